use clap::{Parser, Subcommand};
use dialoguer::{Input, Password};
use dotenvy::dotenv;

use inkpost::cli::{create_admin, set_role};
use inkpost_auth::Role;
use inkpost_db::{PgPool, init_db_pool, run_migrations};
use inkpost_models::RegisterRequest;

#[derive(Parser)]
#[command(name = "inkpost-cli")]
#[command(about = "Inkpost CLI - Administrative tools for Inkpost", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a new administrator account
    CreateAdmin {
        #[arg(short = 'u', long)]
        username: Option<String>,

        #[arg(short = 'f', long)]
        fullname: Option<String>,

        #[arg(short = 'e', long)]
        email: Option<String>,

        /// Password (will be prompted securely if not provided)
        #[arg(short = 'p', long)]
        password: Option<String>,
    },
    /// Change the role of an existing account
    SetRole {
        #[arg(short = 'e', long)]
        email: String,

        /// `member` or `admin`
        #[arg(short = 'r', long)]
        role: Role,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    let cli = Cli::parse();

    let pool = init_db_pool().await?;
    run_migrations(&pool).await?;

    match cli.command {
        Commands::CreateAdmin {
            username,
            fullname,
            email,
            password,
        } => handle_create_admin(&pool, username, fullname, email, password).await,
        Commands::SetRole { email, role } => handle_set_role(&pool, &email, role).await,
    }
}

async fn handle_create_admin(
    pool: &PgPool,
    username: Option<String>,
    fullname: Option<String>,
    email: Option<String>,
    password: Option<String>,
) -> anyhow::Result<()> {
    let username = match username {
        Some(username) => username,
        None => Input::new().with_prompt("Username").interact_text()?,
    };

    let fullname = match fullname {
        Some(fullname) => fullname,
        None => Input::new().with_prompt("Full name").interact_text()?,
    };

    let email = match email {
        Some(email) => email,
        None => Input::new().with_prompt("Email address").interact_text()?,
    };

    let password = match password {
        Some(password) => password,
        None => Password::new()
            .with_prompt("Password")
            .with_confirmation("Confirm password", "Passwords don't match")
            .interact()?,
    };

    let request = RegisterRequest {
        username,
        fullname,
        email,
        password,
    };

    match create_admin(pool, request).await {
        Ok(user) => {
            println!("\n✅ Admin created successfully!");
            println!("   Email: {}", user.email);
            println!("   Name: {}", user.display_name());
            Ok(())
        }
        Err(e) => {
            eprintln!("\n❌ Error creating admin: {}", e);
            std::process::exit(1);
        }
    }
}

async fn handle_set_role(pool: &PgPool, email: &str, role: Role) -> anyhow::Result<()> {
    match set_role(pool, email, role).await {
        Ok(user) => {
            println!("\n✅ {} is now {}", user.email, user.role());
            Ok(())
        }
        Err(e) => {
            eprintln!("\n❌ Error changing role: {}", e);
            std::process::exit(1);
        }
    }
}
