use table_order::{
    config::{AppConfig, StorageMode},
    db::{create_orm_conn, run_migrations},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = AppConfig::from_env()?;
    let StorageMode::Sqlite(url) = &config.storage else {
        anyhow::bail!("DATABASE_URL must point at a sqlite database to run migrations");
    };
    let orm = create_orm_conn(url).await?;
    run_migrations(&orm).await?;
    println!("Migrations applied");
    Ok(())
}
