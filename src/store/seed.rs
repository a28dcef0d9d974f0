//! Starter data for a fresh restaurant: the house menu, the dining room
//! layout and the default branding.

use crate::models::{MenuItem, RestaurantConfig, Table, TableStatus};

fn menu_item(
    id: &str,
    name: &str,
    description: &str,
    price: f64,
    category: &str,
    image: &str,
    allergens: &[&str],
) -> MenuItem {
    MenuItem {
        id: id.to_string(),
        name: name.to_string(),
        description: description.to_string(),
        price,
        category: category.to_string(),
        image: image.to_string(),
        available: true,
        ingredients: None,
        allergens: allergens.iter().map(|a| a.to_string()).collect(),
    }
}

pub fn default_menu() -> Vec<MenuItem> {
    vec![
        menu_item(
            "1",
            "Hamburguesa Clásica",
            "Carne de res, lechuga, tomate, cebolla, queso cheddar y salsa especial",
            12.99,
            "Hamburguesas",
            "https://images.pexels.com/photos/1639557/pexels-photo-1639557.jpeg?auto=compress&cs=tinysrgb&w=400",
            &["Gluten", "Lácteos"],
        ),
        menu_item(
            "2",
            "Pizza Margherita",
            "Masa artesanal, salsa de tomate, mozzarella fresca y albahaca",
            14.50,
            "Pizzas",
            "https://images.pexels.com/photos/315755/pexels-photo-315755.jpeg?auto=compress&cs=tinysrgb&w=400",
            &["Gluten", "Lácteos"],
        ),
        menu_item(
            "3",
            "Ensalada César",
            "Lechuga romana, pollo a la parrilla, crutones, parmesano y aderezo César",
            10.99,
            "Ensaladas",
            "https://images.pexels.com/photos/2097090/pexels-photo-2097090.jpeg?auto=compress&cs=tinysrgb&w=400",
            &["Lácteos", "Huevo"],
        ),
        menu_item(
            "4",
            "Pasta Carbonara",
            "Pasta fresca con panceta, huevo, parmesano y pimienta negra",
            13.75,
            "Pastas",
            "https://images.pexels.com/photos/4518843/pexels-photo-4518843.jpeg?auto=compress&cs=tinysrgb&w=400",
            &["Gluten", "Lácteos", "Huevo"],
        ),
        menu_item(
            "5",
            "Tacos de Pollo",
            "Tres tacos con pollo marinado, pico de gallo, aguacate y crema",
            11.25,
            "Mexicana",
            "https://images.pexels.com/photos/4958792/pexels-photo-4958792.jpeg?auto=compress&cs=tinysrgb&w=400",
            &["Lácteos"],
        ),
        menu_item(
            "6",
            "Salmón a la Parrilla",
            "Filete de salmón con vegetales asados y salsa de limón",
            18.99,
            "Pescados",
            "https://images.pexels.com/photos/3997609/pexels-photo-3997609.jpeg?auto=compress&cs=tinysrgb&w=400",
            &["Pescado"],
        ),
    ]
}

pub fn default_tables() -> Vec<Table> {
    [
        (1, 2, "Ventana", TableStatus::Available),
        (2, 4, "Centro", TableStatus::Occupied),
        (3, 6, "Terraza", TableStatus::Available),
        (4, 2, "Ventana", TableStatus::Reserved),
    ]
    .into_iter()
    .map(|(number, capacity, location, status)| Table {
        id: number.to_string(),
        number,
        capacity,
        location: location.to_string(),
        status,
        qr_code: None,
        notes: None,
    })
    .collect()
}

pub fn default_config() -> RestaurantConfig {
    RestaurantConfig {
        name: "Bella Vista".to_string(),
        logo: None,
        primary_color: "#f97316".to_string(),
        secondary_color: "#fed7aa".to_string(),
        currency: "USD".to_string(),
        language: "es".to_string(),
        phone: None,
        address: None,
        email: None,
    }
}
