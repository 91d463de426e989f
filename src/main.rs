use byte_api::{ByteClient, Config, ProfileUpdate, Response};
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "byte")]
#[command(author = "Dabe Vlohn")]
#[command(version = "0.3.0")]
#[command(about = "Command-line client for the Byte API")]
struct Cli {
    #[command(flatten)]
    config: Config,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Подписаться на пользователя
    Follow { id: String },
    /// Отписаться от пользователя
    Unfollow { id: String },
    /// Показать профиль пользователя
    User { id: String },
    /// Поставить лайк посту
    Like { id: String },
    /// Снять лайк
    Dislike { id: String },
    /// Прокомментировать пост
    Comment { id: String, text: String },
    /// Удалить комментарий ({post id}-{comment id})
    DeleteComment { id: String },
    /// Увеличить счётчик просмотров
    Loop { id: String },
    /// Сделать ребайт поста
    Rebyte { id: String },
    /// Показать доступные цветовые схемы
    Colors,
    /// Обновить профиль
    SetInfo {
        #[arg(long)]
        bio: Option<String>,
        #[arg(long)]
        display_name: Option<String>,
        #[arg(long)]
        username: Option<String>,
        #[arg(long)]
        color_scheme: Option<i64>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Инициализируем логирование
    init_tracing();

    // Парсим конфигурацию из CLI и env
    let cli = Cli::parse();
    info!("Using API at {}", cli.config.api_url);

    let client = ByteClient::from_config(cli.config)?;

    let success = match cli.command {
        Command::Follow { id } => print_response(&client.follow(&id).await?)?,
        Command::Unfollow { id } => print_response(&client.unfollow(&id).await?)?,
        Command::User { id } => print_response(&client.get_user(&id).await?)?,
        Command::Like { id } => print_response(&client.like(&id).await?)?,
        Command::Dislike { id } => print_response(&client.dislike(&id).await?)?,
        Command::Comment { id, text } => print_response(&client.comment(&id, &text).await?)?,
        Command::DeleteComment { id } => print_response(&client.delete_comment(&id).await?)?,
        Command::Loop { id } => print_response(&client.loop_post(&id).await?)?,
        Command::Rebyte { id } => print_response(&client.rebyte(&id).await?)?,
        Command::Colors => print_response(&client.get_colors().await?)?,
        Command::SetInfo {
            bio,
            display_name,
            username,
            color_scheme,
        } => {
            let update = ProfileUpdate {
                bio,
                display_name,
                username,
                color_scheme,
            };
            print_response(&client.set_info(&update).await?)?
        }
    };

    if !success {
        warn!("API reported failure");
        std::process::exit(1);
    }

    Ok(())
}

/// Печатает ответ как JSON и сообщает, успешна ли операция
fn print_response<T: Serialize>(response: &Response<T>) -> anyhow::Result<bool> {
    println!("{}", serde_json::to_string_pretty(response)?);
    Ok(response.is_success())
}

/// Инициализирует систему логирования с использованием tracing
fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("info"))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_line_number(true)
        .init();
}
