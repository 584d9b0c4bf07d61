use clap::Parser;
use property_map::{browse, cli, config, error, logging, report, session};
use cli::{Cli, Commands, OutputFormat};
use config::Config;
use error::Result;
use property_map_common::PropertyId;

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);
    let data = cli.data.as_deref();

    match cli.command {
        Commands::Councils => {
            let controller = session::open_session(data)?;
            println!("🏛  自治体一覧\n");
            print!(
                "{}",
                report::render_councils(
                    controller.records(),
                    &controller.council_options(),
                    controller.selected_council(),
                )
            );
        }

        Commands::List { council, format } => {
            let mut controller = session::open_session(data)?;
            controller.on_council_change(council);
            let filtered = controller.filtered();

            if filtered.is_empty() && !controller.selected_council().is_empty() {
                tracing::warn!(council = %controller.selected_council(), "no property matches council");
            }

            match format {
                OutputFormat::Table => {
                    print!("{}", report::render_property_table(&filtered));
                    println!("\n✔ {}件", filtered.len());
                }
                OutputFormat::Json => {
                    let json = serde_json::to_string_pretty(&filtered)?;
                    println!("{}", json);
                }
            }
        }

        Commands::Show { property_id } => {
            let mut controller = session::open_session(data)?;
            controller.activate_by_id(&PropertyId::new(property_id))?;
            if let Some(detail) = controller.detail() {
                print!("{}", report::render_detail_panel(&detail));
            }
        }

        Commands::Browse => {
            let mut controller = session::open_session(data)?;
            browse::run_interactive_browse(&mut controller)?;
        }

        Commands::Config { set_api_key, show } => {
            // 設定ファイルを読むのはこのコマンドだけ
            let mut config = Config::load()?;

            if let Some(key) = set_api_key {
                config.set_api_key(key)?;
                println!("✔ 地図APIキーを設定しました");
            }

            if show {
                println!("設定:");
                println!("  パス: {}", Config::config_path()?.display());
                println!(
                    "  APIキー: {}",
                    if config.get_api_key().is_ok() { "設定済み" } else { "未設定" }
                );
            }
        }
    }

    Ok(())
}
