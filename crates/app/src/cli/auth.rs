use clap::{Args, Subcommand};
use storefront_app::context::AppContext;

#[derive(Debug, Args)]
pub(crate) struct AuthCommand {
    #[command(subcommand)]
    command: AuthSubcommand,
}

#[derive(Debug, Subcommand)]
enum AuthSubcommand {
    /// Sign in with email and password
    SignIn(Credentials),

    /// Create an account and sign in
    SignUp(SignUpArgs),

    /// Forget the signed-in user
    SignOut,

    /// Email a password reset link
    ResetPassword(ResetPasswordArgs),

    /// Show who is signed in
    Status,
}

#[derive(Debug, Args)]
struct Credentials {
    /// Account email
    #[arg(long)]
    email: String,

    /// Account password
    #[arg(long, env = "STOREFRONT_PASSWORD", hide_env_values = true)]
    password: String,
}

#[derive(Debug, Args)]
struct SignUpArgs {
    #[command(flatten)]
    credentials: Credentials,

    /// Display name
    #[arg(long)]
    name: Option<String>,
}

#[derive(Debug, Args)]
struct ResetPasswordArgs {
    /// Account email
    #[arg(long)]
    email: String,
}

pub(crate) async fn run(context: &AppContext, command: AuthCommand) -> Result<(), String> {
    let identity = &context.identity;

    match command.command {
        AuthSubcommand::SignIn(Credentials { email, password }) => {
            let session = identity
                .sign_in(&email, &password)
                .await
                .map_err(|error| format!("sign in failed: {error}"))?;

            println!("signed in as {}", session.name());
        }
        AuthSubcommand::SignUp(SignUpArgs { credentials, name }) => {
            let session = identity
                .sign_up(&credentials.email, &credentials.password, name)
                .await
                .map_err(|error| format!("sign up failed: {error}"))?;

            println!("account created, signed in as {}", session.name());
        }
        AuthSubcommand::SignOut => {
            identity
                .sign_out()
                .await
                .map_err(|error| format!("sign out failed: {error}"))?;

            println!("signed out");
        }
        AuthSubcommand::ResetPassword(ResetPasswordArgs { email }) => {
            identity
                .send_password_reset(&email)
                .await
                .map_err(|error| format!("password reset failed: {error}"))?;

            println!("password reset email sent to {}", email.trim());
        }
        AuthSubcommand::Status => match context.sessions.current() {
            Some(session) => println!("signed in as {} <{}>", session.name(), session.email),
            None => println!("not signed in"),
        },
    }

    Ok(())
}
