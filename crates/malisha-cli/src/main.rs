use clap::{Parser, Subcommand};
use dialoguer::{Input, Password};
use dotenvy::dotenv;
use tracing::warn;

use malisha_auth::{AuthSessionStore, FileStorage, access, dashboard_menu, visible_items};
use malisha_cli::{GatewayClient, gateway_url, open_storage, render_menu};
use malisha_core::Permission;
use malisha_models::LoginRequest;
use malisha_observability::init_console_logging;

#[derive(Parser)]
#[command(name = "malisha-cli")]
#[command(about = "Malisha CLI - Sign in to the Malisha gateway and inspect access", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Sign in and keep the session
    Login {
        /// Email address
        #[arg(short = 'e', long)]
        email: Option<String>,

        /// Password (will be prompted securely if not provided)
        #[arg(short = 'p', long)]
        password: Option<String>,
    },
    /// Sign out and clear the stored session
    Logout,
    /// Show the signed-in user
    Whoami {
        /// Ask the gateway whether the session is still valid
        #[arg(long)]
        verify: bool,
    },
    /// Check one permission for the signed-in user
    Can {
        /// Permission key, e.g. STUDENTS_CREATE or user:manage
        permission: String,
    },
    /// Print the dashboard menu visible to the signed-in user
    Menu,
    /// Print the permission table
    Permissions,
}

type Store = AuthSessionStore<FileStorage>;

#[tokio::main]
async fn main() {
    dotenv().ok();
    init_console_logging("warn");

    let cli = Cli::parse();
    let mut store = AuthSessionStore::rehydrate(open_storage());

    let result = match cli.command {
        Commands::Login { email, password } => handle_login(&mut store, email, password).await,
        Commands::Logout => handle_logout(&mut store).await,
        Commands::Whoami { verify } => handle_whoami(&mut store, verify).await,
        Commands::Can { permission } => {
            handle_can(&store, &permission);
            Ok(())
        }
        Commands::Menu => {
            handle_menu(&store);
            Ok(())
        }
        Commands::Permissions => {
            handle_permissions();
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("\n❌ {:#}", e);
        std::process::exit(1);
    }
}

async fn handle_login(
    store: &mut Store,
    email: Option<String>,
    password: Option<String>,
) -> anyhow::Result<()> {
    let email = match email {
        Some(email) => email,
        None => Input::<String>::new().with_prompt("Email address").interact_text()?,
    };
    let password = match password {
        Some(password) => password,
        None => Password::new().with_prompt("Password").interact()?,
    };

    let client = GatewayClient::new(gateway_url())?;
    let response = client.login(&LoginRequest { email, password }).await?;

    let user = response.user;
    println!("\n✅ Signed in as {} ({})", user.name, user.role);
    store.set_auth(user, response.access_token);
    Ok(())
}

async fn handle_logout(store: &mut Store) -> anyhow::Result<()> {
    if !store.is_authenticated() {
        println!("Not signed in");
        return Ok(());
    }

    let client = GatewayClient::new(gateway_url())?;
    let redirect = match client.logout(store.token()).await {
        Ok(response) => Some(response.redirect_to),
        Err(e) => {
            warn!(error = %e, "Gateway logout failed, clearing local session anyway");
            None
        }
    };

    store.logout();
    println!("✅ Signed out");
    if let Some(redirect) = redirect {
        println!("   Next: {}", redirect);
    }
    Ok(())
}

async fn handle_whoami(store: &mut Store, verify: bool) -> anyhow::Result<()> {
    if verify {
        if let Some(token) = store.token().map(str::to_string) {
            let client = GatewayClient::new(gateway_url())?;
            let session = client.session(&token).await?;
            if !session.is_authenticated {
                store.logout();
                println!("Session expired, signed out");
                return Ok(());
            }
        }
    }

    match store.user() {
        Some(user) => {
            println!("{} <{}>", user.name, user.email);
            println!("   Role: {}", user.role);
            if !user.permissions.is_empty() {
                println!("   Permissions: {}", user.permissions.join(", "));
            }
        }
        None => println!("Not signed in"),
    }
    Ok(())
}

fn handle_can(store: &Store, permission: &str) {
    let session = store.session();
    let by_table = access::permission_allowed(session, permission);
    let by_list = store.has_permission(permission);

    println!("{}", permission);
    println!("   Permission table: {}", if by_table { "allowed" } else { "denied" });
    println!("   Explicit grant:   {}", if by_list { "yes" } else { "no" });
}

fn handle_menu(store: &Store) {
    let items = visible_items(&dashboard_menu(), store.session());
    if items.is_empty() {
        println!("Nothing visible. Sign in first.");
        return;
    }
    for line in render_menu(&items) {
        println!("{}", line);
    }
}

fn handle_permissions() {
    for permission in Permission::ALL {
        let roles: Vec<&str> = permission
            .allowed_roles()
            .iter()
            .map(|role| role.as_str())
            .collect();
        println!("{:<22} {}", permission.key(), roles.join(", "));
    }
}
