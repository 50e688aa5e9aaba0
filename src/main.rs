use chrono::Utc;
use clap::Parser;
use pasiulymas::{cli, config, error, logging, pick, session, workbook};
use cli::{Cli, Commands};
use config::Config;
use error::{AppError, Result};
use std::path::PathBuf;

/// ブックを読み込み、失敗したファイルを表示する（全滅ならエラー）
fn load_inputs(paths: &[PathBuf]) -> Result<Vec<workbook::LoadedWorkbook>> {
    let files = workbook::collect_workbook_paths(paths)?;
    let report = workbook::load_workbooks(&files);

    for failure in &report.failures {
        println!("⚠ {}", failure);
    }

    if report.workbooks.is_empty() {
        let joined = paths
            .iter()
            .map(|p| p.display().to_string())
            .collect::<Vec<_>>()
            .join(", ");
        return Err(AppError::NoWorkbooksLoaded(joined));
    }

    let sheet_count: usize = report.workbooks.iter().map(|w| w.sheets.len()).sum();
    println!(
        "✔ {}ファイル / {}シートを読み込み",
        report.workbooks.len(),
        sheet_count
    );
    Ok(report.workbooks)
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);
    let config = Config::load()?;

    match cli.command {
        Commands::Session { paths, output, templates } => {
            println!("📦 pasiulymas - 提案書の作成\n");

            let registry = config.template_registry(templates.as_deref())?;
            let tz = config.tz()?;
            let output_dir = config.resolve_output_dir(output.as_deref());

            let workbooks = load_inputs(&paths)?;
            let mut session = session::Session::new(workbooks, registry);
            session::run_interactive(&mut session, &output_dir, tz, config.preview_rows)?;
        }

        Commands::Export { paths, picks, output, templates } => {
            println!("📄 pasiulymas - 一括出力\n");

            let specs = picks
                .iter()
                .map(|p| pick::parse_pick(p))
                .collect::<Result<Vec<_>>>()?;
            let registry = config.template_registry(templates.as_deref())?;
            let tz = config.tz()?;
            let output_dir = config.resolve_output_dir(output.as_deref());

            let workbooks = load_inputs(&paths)?;
            let mut session = session::Session::new(workbooks, registry);
            let added = pick::apply_picks(&mut session, &specs)?;
            println!("✔ {}行をメモリに追加", added);

            let now = Utc::now().with_timezone(&tz);
            let outcome = session.export(&output_dir, &now)?;
            session::report_export(&outcome);
        }

        Commands::Sheets { paths } => {
            let workbooks = load_inputs(&paths)?;
            for wb in &workbooks {
                println!("\n{} (カテゴリ判定名: {})", wb.file_name, wb.originating_file);
                for sheet in &wb.sheets {
                    println!("  - {}: {}行 x {}列", sheet.name, sheet.rows.len(), sheet.width());
                }
            }
        }

        Commands::Templates { templates } => {
            let registry = config.template_registry(templates.as_deref())?;
            if registry.is_empty() {
                println!("テンプレートがありません（すべて \"Column N\" で出力）");
            }
            for (i, template) in registry.entries().iter().enumerate() {
                println!("{}) {} ({}列)", i + 1, template.key, template.labels.len());
                println!("   {}", template.labels.join(" | "));
            }
        }

        Commands::Config { set_output_dir, set_timezone, set_templates, show } => {
            let mut config = config;
            let mut changed = false;

            if let Some(dir) = set_output_dir {
                config.output_dir = Some(dir);
                changed = true;
            }

            if let Some(tz) = set_timezone {
                config::parse_timezone(&tz)?;
                config.timezone = tz;
                changed = true;
            }

            if let Some(path) = set_templates {
                // 保存前に読めることを確認
                pasiulymas_common::TemplateRegistry::from_file(&path)?;
                config.templates_path = Some(path);
                changed = true;
            }

            if changed {
                config.save()?;
                println!("✔ 設定を保存しました");
            }

            if show || !changed {
                println!("設定:");
                println!(
                    "  出力先: {}",
                    config.resolve_output_dir(None).display()
                );
                println!(
                    "  テンプレート: {}",
                    config
                        .templates_path
                        .as_ref()
                        .map(|p| p.display().to_string())
                        .unwrap_or_else(|| "組み込み".into())
                );
                println!("  タイムゾーン: {}", config.timezone);
                println!("  プレビュー行数: {}", config.preview_rows);
            }
        }
    }

    Ok(())
}
