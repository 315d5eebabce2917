use adventures::{
    config::ServerConfig,
    db,
    repositories::{SqliteAdventureRepository, SqliteUserRepository},
    services::{
        AdventureService, Argon2Hashing, RegisterUser, UserService, UserServiceError,
    },
};
use clap::{Parser, Subcommand};
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "adventures-cli")]
#[command(about = "CLI tool for managing adventure users and listings", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// User management commands
    User {
        #[command(subcommand)]
        command: UserCommands,
    },

    /// Adventure inspection commands
    Adventure {
        #[command(subcommand)]
        command: AdventureCommands,
    },
}

#[derive(Subcommand)]
enum UserCommands {
    /// Register a new user
    Create {
        /// Email address
        #[arg(short, long)]
        email: String,

        /// Password (will prompt if not provided)
        #[arg(short, long)]
        password: Option<String>,
    },
}

#[derive(Subcommand)]
enum AdventureCommands {
    /// List all adventures with their owners
    List,
}

fn get_password(prompt: &str) -> Result<String, Box<dyn std::error::Error>> {
    use std::io::{self, Write};
    print!("{}: ", prompt);
    io::stdout().flush()?;

    Ok(rpassword::read_password()?)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Parse CLI arguments
    let cli = Cli::parse();

    // Connect to database
    let config = ServerConfig::from_env()?;
    let pool = db::create_pool(&config).await?;

    // Run migrations
    db::run_migrations(&pool).await?;

    match cli.command {
        Commands::User { command } => match command {
            UserCommands::Create { email, password } => {
                let user_repository = Arc::new(SqliteUserRepository::new(pool.clone()));
                let user_service =
                    UserService::new(user_repository, Arc::new(Argon2Hashing::default()));

                // Fail before prompting for a password nobody will use
                if let Some(existing) = user_service.find_user_by_email(&email).await? {
                    eprintln!(
                        "Email {} is already registered (user ID {})",
                        existing.email, existing.id
                    );
                    std::process::exit(1);
                }

                let password = match password {
                    Some(pw) => pw,
                    None => {
                        let pw = get_password("Password")?;
                        let confirm = get_password("Confirm password")?;
                        if pw != confirm {
                            eprintln!("Passwords do not match");
                            std::process::exit(1);
                        }
                        pw
                    }
                };

                match user_service
                    .register(RegisterUser {
                        email: email.clone(),
                        password,
                    })
                    .await
                {
                    Ok(user) => {
                        println!("User created successfully!");
                        println!("  ID: {}", user.id);
                        println!("  Email: {}", user.email);
                    }
                    Err(UserServiceError::EmailInUse) => {
                        eprintln!("Email {} is already registered", email);
                        std::process::exit(1);
                    }
                    Err(e) => {
                        eprintln!("Failed to create user: {}", e);
                        std::process::exit(1);
                    }
                }
            }
        },
        Commands::Adventure { command } => match command {
            AdventureCommands::List => {
                let adventure_service =
                    AdventureService::new(Arc::new(SqliteAdventureRepository::new(pool.clone())));
                let adventures = adventure_service.list().await?;

                if adventures.is_empty() {
                    println!("No adventures found");
                } else {
                    println!("{:<6} {:<30} {:<30} Created", "ID", "Title", "Owner");
                    println!("{}", "-".repeat(90));
                    for adventure in adventures {
                        println!(
                            "{:<6} {:<30} {:<30} {}",
                            adventure.id,
                            adventure.title,
                            adventure.owner_email,
                            adventure.created_at.format("%Y-%m-%d %H:%M:%S")
                        );
                    }
                }
            }
        },
    }

    pool.close().await;
    Ok(())
}
