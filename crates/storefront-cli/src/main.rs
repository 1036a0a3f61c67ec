use anyhow::Context;
use clap::{Parser, Subcommand};
use dialoguer::{Input, Password};
use dotenvy::dotenv;
use storefront_cli::admin::create_admin;
use storefront_cli::seeder::{self, SeedConfig};
use storefront_config::{DatabaseConfig, PasswordConfig};
use storefront_core::CredentialHasher;
use storefront_db::{PgPool, init_db_pool, run_migrations};

#[derive(Parser)]
#[command(name = "storefront-cli")]
#[command(about = "Storefront CLI - Administrative tools for Storefront", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a new administrator account
    CreateAdmin {
        /// Username (letters and digits)
        #[arg(short = 'u', long)]
        username: Option<String>,

        /// Phone number (digits only)
        #[arg(short = 'p', long)]
        phone: Option<String>,

        /// Password (will be prompted securely if not provided)
        #[arg(long)]
        password: Option<String>,
    },
    /// Seed the database with fake categories, products and users
    Seed {
        /// Number of categories to create
        #[arg(short = 'c', long, default_value = "5")]
        categories: usize,

        /// Number of products per category
        #[arg(long, default_value = "20")]
        products: usize,

        /// Number of regular users to create
        #[arg(long, default_value = "10")]
        users: usize,
    },
    /// Clear all seeded data (keeps admins)
    ClearSeed,
    /// Apply pending migrations
    Migrate,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    let cli = Cli::parse();
    let database = DatabaseConfig::from_env()?;
    let pool = init_db_pool(&database)
        .await
        .context("Failed to connect to database")?;

    match cli.command {
        Commands::CreateAdmin {
            username,
            phone,
            password,
        } => handle_create_admin(&pool, username, phone, password).await,
        Commands::Seed {
            categories,
            products,
            users,
        } => {
            let hasher = CredentialHasher::from_config(&PasswordConfig::from_env()?)?;
            let config = SeedConfig::new(categories)
                .with_products(products)
                .with_users(users);
            seeder::seed_all(&pool, &hasher, config).await
        }
        Commands::ClearSeed => seeder::clear_all(&pool).await,
        Commands::Migrate => {
            run_migrations(&pool).await?;
            println!("✅ Migrations applied");
            Ok(())
        }
    }
}

async fn handle_create_admin(
    pool: &PgPool,
    username: Option<String>,
    phone: Option<String>,
    password: Option<String>,
) -> anyhow::Result<()> {
    let hasher = CredentialHasher::from_config(&PasswordConfig::from_env()?)?;

    let username = match username {
        Some(username) => username,
        None => Input::new().with_prompt("Username").interact_text()?,
    };

    let phone = match phone {
        Some(phone) => phone,
        None => Input::new().with_prompt("Phone").interact_text()?,
    };

    let password = match password {
        Some(password) => password,
        None => Password::new()
            .with_prompt("Password")
            .with_confirmation("Confirm password", "Passwords don't match")
            .interact()?,
    };

    let id = create_admin(pool, &hasher, &username, &phone, &password)
        .await
        .context("Error creating admin")?;

    println!("\n✅ Admin created successfully!");
    println!("   Username: {}", username);
    println!("   Id: {}", id);
    Ok(())
}
