use table_order::{
    config::{AppConfig, StorageMode},
    store::{Backend, Catalog, seed},
};

/// Load the starter menu, tables and branding into a SQLite database.
/// Rows that already exist are left untouched.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = AppConfig::from_env()?;
    if config.storage == StorageMode::Memory {
        anyhow::bail!("DATABASE_URL must point at a sqlite database to seed it");
    }

    let backend = Backend::connect(&config.storage).await?;
    let catalog = Catalog::new(backend.clone());

    let mut menu_added = 0;
    for item in seed::default_menu() {
        if catalog.get_menu_item(&item.id).await?.is_none() {
            catalog.insert_menu_item(&item).await?;
            menu_added += 1;
        }
    }
    println!("Seeded {menu_added} menu items");

    let mut tables_added = 0;
    for table in seed::default_tables() {
        if catalog.find_table_by_number(table.number).await?.is_none() {
            catalog.insert_table(&table).await?;
            tables_added += 1;
        }
    }
    println!("Seeded {tables_added} tables");

    // Falls back to the defaults when no row exists yet; an existing row is rewritten unchanged.
    let current = catalog.config().await?;
    catalog.save_config(&current).await?;
    println!("Restaurant config: {}", current.name);

    backend.close().await;
    Ok(())
}
