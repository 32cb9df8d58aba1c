use serde::Serialize;

use storefront::{logins::SessionToken, users::SignupForm, ApiClient, ClientConfig};

#[derive(Debug, PartialEq)]
enum Command {
    Login { email: String, password: String },
    Logout,
    WhoAmI,
    Verify { email: String, password: String },
    Signup(SignupArgs),
    Users,
    User(i64),
    DeleteUser(i64),
    Logins,
    LoginRecord(i64),
    UserLogins(i64),
    MyLogins(String),
}

#[derive(Debug, PartialEq)]
struct SignupArgs {
    name: String,
    email: String,
    nickname: String,
    password: String,
    confirm_password: String,
}

const USAGE: &str = "usage: storefront <command>
  login <email> <password>
  logout
  whoami
  verify <email> <password>
  signup <name> <email> <nickname> <password> <confirm>
  users | user <id> | delete-user <id>
  logins | login-record <id> | user-logins <user-id> | my-logins <token>";

fn parse_id(raw: &str) -> anyhow::Result<i64> {
    raw.parse::<i64>()
        .map_err(|_| anyhow::anyhow!("expected a numeric id, got {:?}", raw))
}

fn parse_command(args: &[String]) -> anyhow::Result<Command> {
    let words: Vec<&str> = args.iter().map(String::as_str).collect();
    let cmd = match words.as_slice() {
        ["login", email, password] => Command::Login {
            email: email.to_string(),
            password: password.to_string(),
        },
        ["logout"] => Command::Logout,
        ["whoami"] => Command::WhoAmI,
        ["verify", email, password] => Command::Verify {
            email: email.to_string(),
            password: password.to_string(),
        },
        ["signup", name, email, nickname, password, confirm] => Command::Signup(SignupArgs {
            name: name.to_string(),
            email: email.to_string(),
            nickname: nickname.to_string(),
            password: password.to_string(),
            confirm_password: confirm.to_string(),
        }),
        ["users"] => Command::Users,
        ["user", id] => Command::User(parse_id(id)?),
        ["delete-user", id] => Command::DeleteUser(parse_id(id)?),
        ["logins"] => Command::Logins,
        ["login-record", id] => Command::LoginRecord(parse_id(id)?),
        ["user-logins", id] => Command::UserLogins(parse_id(id)?),
        ["my-logins", token] => Command::MyLogins(token.to_string()),
        _ => anyhow::bail!("{}", USAGE),
    };
    Ok(cmd)
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

async fn run(api: &ApiClient, cmd: Command) -> anyhow::Result<()> {
    match cmd {
        Command::Login { email, password } => print_json(&api.login(&email, &password).await?),
        Command::Logout => print_json(&api.logout().await?),
        Command::WhoAmI => print_json(&api.current_user()),
        Command::Verify { email, password } => {
            print_json(&api.verify_user(&email, &password).await?)
        }
        Command::Signup(a) => {
            let form = SignupForm {
                name: a.name,
                email: a.email,
                nickname: a.nickname,
                password: a.password,
                confirm_password: a.confirm_password,
                profile_id: None,
            };
            print_json(&api.create_user(&form).await?)
        }
        Command::Users => print_json(&api.users().await?),
        Command::User(id) => print_json(&api.user(id).await?),
        Command::DeleteUser(id) => {
            let res = api.delete_user(id).await?;
            println!("{}", res.message);
            Ok(())
        }
        Command::Logins => print_json(&api.logins().await?),
        Command::LoginRecord(id) => print_json(&api.login_record(id).await?),
        Command::UserLogins(id) => print_json(&api.user_logins(id).await?),
        Command::MyLogins(token) => print_json(&api.my_logins(&SessionToken::new(token)).await?),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let env_filter =
        std::env::var("RUST_LOG").unwrap_or_else(|_| "storefront=debug".to_string());
    let json_logs = std::env::var("LOG_FORMAT")
        .map(|v| v == "json")
        .unwrap_or(false);

    if json_logs {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_writer(std::io::stderr)
            .init();
    }

    let args: Vec<String> = std::env::args().skip(1).collect();
    let cmd = parse_command(&args)?;

    let config = ClientConfig::from_env()?;
    tracing::debug!(base_url = %config.api_base_url, "client configured");
    let api = ApiClient::init(&config).await?;

    run(&api, cmd).await
}
