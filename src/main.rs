use artvee_scrape::cli::CliArgs;
use artvee_scrape::core::{processor, stats};
use artvee_scrape::error::{AppError, AppResult};
use artvee_scrape::logging::{log, setup_logging, LogLevel};
use artvee_scrape::net::{HttpClient, PageFetcher};
use artvee_scrape::testing;
use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};
use std::process::ExitCode;
use std::sync::Arc;
use tokio::runtime::Builder;

fn main() -> ExitCode {
    setup_logging();

    let cli_args = match CliArgs::try_parse() {
        Ok(args) => args,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            let _ = e.print();
            return ExitCode::SUCCESS;
        }
        Err(e) => {
            log(LogLevel::Error, &format!("CLI Argument Error: {}", e));
            let _ = CliArgs::command().print_help();
            return ExitCode::from(2);
        }
    };

    let runtime = match Builder::new_multi_thread()
        .enable_all()
        .thread_name("artvee-worker")
        .worker_threads(num_cpus::get())
        .build()
    {
        Ok(rt) => rt,
        Err(e) => {
            log(
                LogLevel::Error,
                &format!("FATAL: Failed to build Tokio runtime: {}", e),
            );
            return ExitCode::FAILURE;
        }
    };

    let main_result = runtime.block_on(run_app(cli_args));

    match main_result {
        Ok(exit_code) => ExitCode::from(exit_code as u8),
        Err(e) => {
            if !matches!(e, AppError::Argument(_)) {
                log(LogLevel::Error, &format!("FATAL: {}", e));
            }
            ExitCode::FAILURE
        }
    }
}

async fn run_app(args: CliArgs) -> AppResult<i32> {
    if let Some(test_file_path) = args.get_test_listing_file() {
        let output_path = args.get_test_output_file();

        if !test_file_path.exists() {
            log(
                LogLevel::Error,
                &format!("Test input file not found: {}", test_file_path.display()),
            );
            return Err(AppError::Argument("Test input file not found.".to_string()));
        }

        let page_url = testing::test_page_url(args.get_base_url())?;
        return match testing::test_listing_extract(&test_file_path, output_path, &page_url).await
        {
            Ok(_) => Ok(0),
            Err(e) => {
                log(LogLevel::Error, &format!("Test mode failed: {:?}", e));
                Ok(1)
            }
        };
    }

    let settings = match args.run_settings() {
        Ok(settings) => settings,
        Err(e) => {
            log(LogLevel::Error, &e.to_string());
            return Err(e);
        }
    };
    let store = args.store_target()?.open().await;
    let fetcher: Arc<dyn PageFetcher> = Arc::new(HttpClient::new(args.get_timeout())?);

    let run_stats = processor::run(settings, fetcher, store).await?;
    Ok(stats::determine_exit_code(&run_stats))
}
