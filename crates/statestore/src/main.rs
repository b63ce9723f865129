mod providers;

use clap::{Parser, Subcommand};
use colored::Colorize;
use statestore_core::{
    CloudProvider, ClusterRecord, ClusterStore, FileClusterStore, StateStoreExecutor, StepOutcome,
};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "statestore")]
#[command(about = "クラスタのステートストアを各クラウドに用意する", long_about = None)]
#[command(version)]
struct Cli {
    /// `.statestore/` を置くディレクトリ（省略時はカレントディレクトリ）
    #[arg(long, env = "STATESTORE_DIR", global = true)]
    state_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// クラスタレコードを登録
    Register {
        /// クラスタ名
        cluster: String,
        /// aws | civo | digitalocean | vultr
        #[arg(long)]
        provider: CloudProvider,
        /// リージョン
        #[arg(long)]
        region: String,
        /// ステートストアのバケット名
        #[arg(long)]
        bucket: String,
        /// アーティファクト用バケット名 (AWS)
        #[arg(long)]
        artifacts_bucket: Option<String>,
        /// AWS アクセスキー
        #[arg(long, env = "AWS_ACCESS_KEY_ID", hide_env_values = true)]
        aws_access_key_id: Option<String>,
        /// AWS シークレットキー
        #[arg(long, env = "AWS_SECRET_ACCESS_KEY", hide_env_values = true)]
        aws_secret_access_key: Option<String>,
    },
    /// 認証情報を取得 (StateStoreCredentials)
    Credentials {
        /// クラスタ名
        cluster: String,
    },
    /// バケットを作成 (StateStoreCreate)
    Create {
        /// クラスタ名
        cluster: String,
    },
    /// 両ステップを順に実行
    Provision {
        /// クラスタ名
        cluster: String,
    },
    /// クラスタレコードを表示
    Show {
        /// クラスタ名
        cluster: String,
    },
}

impl Commands {
    fn cluster(&self) -> &str {
        match self {
            Commands::Register { cluster, .. }
            | Commands::Credentials { cluster }
            | Commands::Create { cluster }
            | Commands::Provision { cluster }
            | Commands::Show { cluster } => cluster,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // ログは stderr、結果は stdout
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let state_dir = match cli.state_dir {
        Some(dir) => dir,
        None => std::env::current_dir()?,
    };
    let store = Arc::new(FileClusterStore::new(&state_dir));
    let cluster = cli.command.cluster().to_string();

    match cli.command {
        Commands::Register {
            cluster,
            provider,
            region,
            bucket,
            artifacts_bucket,
            aws_access_key_id,
            aws_secret_access_key,
        } => {
            let mut record = ClusterRecord::new(&cluster, provider, region, bucket);
            if let Some(name) = artifacts_bucket {
                record = record.with_artifacts_bucket(name);
            }
            if provider == CloudProvider::Aws {
                if let (Some(key), Some(secret)) = (aws_access_key_id, aws_secret_access_key) {
                    record = record.with_static_credentials(key, secret);
                }
            }
            store.register(record).await?;
            println!(
                "{} クラスタ {} を登録しました ({})",
                "✓".green(),
                cluster.cyan(),
                store.state_path().display()
            );
        }
        Commands::Show { .. } => {
            let mut record = store.get_cluster(&cluster).await?;
            // シークレットは表示しない
            if !record.state_store_credentials.secret_access_key.is_empty() {
                record.state_store_credentials.secret_access_key = "********".to_string();
            }
            if let Some(creds) = record.static_credentials.as_mut() {
                creds.secret_access_key = "********".to_string();
            }
            println!("{}", serde_json::to_string_pretty(&record)?);
        }
        Commands::Credentials { .. } => {
            let executor = executor_for(store, &cluster).await?;
            let outcome = executor.acquire_state_store_credentials(&cluster).await?;
            print_outcome("StateStoreCredentials", &outcome);
        }
        Commands::Create { .. } => {
            let executor = executor_for(store, &cluster).await?;
            let outcome = executor.create_state_store(&cluster).await?;
            print_outcome("StateStoreCreate", &outcome);
        }
        Commands::Provision { .. } => {
            let executor = executor_for(store, &cluster).await?;
            let report = executor.provision(&cluster).await?;
            print_outcome("StateStoreCredentials", &report.credentials);
            print_outcome("StateStoreCreate", &report.create);
        }
    }

    Ok(())
}

async fn executor_for(
    store: Arc<FileClusterStore>,
    cluster: &str,
) -> anyhow::Result<StateStoreExecutor> {
    let record = store.get_cluster(cluster).await?;
    let registry = providers::registry_for(&record).await?;
    Ok(StateStoreExecutor::new(store, registry))
}

fn print_outcome(step: &str, outcome: &StepOutcome) {
    match outcome {
        StepOutcome::Skipped => {
            println!("{} {}: 完了済みのためスキップ", "↷".yellow(), step.bold());
        }
        StepOutcome::NotApplicable => {
            println!("{} {}: このプロバイダでは不要", "-".dimmed(), step.bold());
        }
        StepOutcome::Completed { details } => {
            println!("{} {}: 完了", "✓".green(), step.bold());
            if let Some(details) = details {
                println!("  バケット: {}", details.name.cyan());
                if let Some(hostname) = &details.hostname {
                    println!("  ホスト: {}", hostname);
                }
                if let Some(id) = &details.id {
                    println!("  ID: {}", id);
                }
            }
        }
    }
}
