use anyhow::{Context, Result};
use clap::Parser;
use mdlite::{MarkdownOptions, MarkdownService};
use tokio::io::AsyncWriteExt;
use tracing::info;

use mdlite_preview::cli::CliArgs;
use mdlite_preview::{
    load_with_fallback, source_for, status_line, telemetry, DocumentSource, LoadedDocument,
    Preview,
};

#[tokio::main]
async fn main() -> Result<()> {
    let args = CliArgs::parse();
    telemetry::init(args.log_format)?;

    let service = MarkdownService::try_with_options(MarkdownOptions {
        tab_width: args.tab_width,
        ..Default::default()
    })?;

    let source = source_for(&args.source)?;
    let loaded = if args.no_fallback {
        let content = source
            .fetch(&args.source)
            .await
            .with_context(|| format!("failed to load {}", args.source))?;
        LoadedDocument::remote(content)
    } else {
        load_with_fallback(source.as_ref(), &args.source).await
    };

    let status = status_line(&args.source, &loaded);
    info!(origin = ?loaded.origin, "{status}");

    let page = Preview::new(&service)
        .show_source(!args.hide_source)
        .render(&loaded, &status);

    match &args.output {
        Some(path) => tokio::fs::write(path, page)
            .await
            .with_context(|| format!("failed to write {}", path.display()))?,
        None => {
            let mut stdout = tokio::io::stdout();
            stdout.write_all(page.as_bytes()).await?;
            stdout.flush().await?;
        }
    }

    Ok(())
}
