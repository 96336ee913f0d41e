//! Subcommand handlers.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use mint_bench::{
    BenchConfig, BenchError, BenchmarkApi, BenchmarkDriver, FileResultSink, PrivateKey,
    ProcessToolRunner, ResultSink, RunRecord, ToolRunner,
};
use tracing::info;

/// Where run results go besides the per-entry result files.
pub struct RunOutputs {
    pub json: bool,
    pub metrics_file: Option<PathBuf>,
    pub write_summary: bool,
}

fn driver(config: BenchConfig) -> BenchmarkDriver<ProcessToolRunner, FileResultSink> {
    let runner = ProcessToolRunner::new().with_timeout(config.timeout());
    BenchmarkDriver::new(config, runner, FileResultSink::new())
}

fn load_credential() -> Result<PrivateKey> {
    PrivateKey::from_env().context("A signing key is required to send transactions")
}

pub fn plan(config: &BenchConfig, json: bool) -> Result<()> {
    let entries = driver(config.clone()).plan();

    if json {
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    for entry in &entries {
        if entry.test_number == 1 {
            println!("Chain \"{}\"", entry.network.name);
        }
        println!(
            "  Test #{}  length={}  -> {}",
            entry.test_number,
            entry.length,
            entry.result_path.display()
        );
        println!("    {}", entry.invocation.render());
    }
    println!("{} invocations", entries.len());
    Ok(())
}

pub async fn run(config: BenchConfig, outputs: RunOutputs) -> Result<()> {
    let credential = load_credential()?;
    run_with(&driver(config), &credential, &outputs).await
}

/// Run the matrix and write the summary and metrics, including for a run
/// that aborted part way.
async fn run_with<R: ToolRunner, S: ResultSink>(
    driver: &BenchmarkDriver<R, S>,
    credential: &PrivateKey,
    outputs: &RunOutputs,
) -> Result<()> {
    let (summary, abort) = match driver.run(credential).await {
        Ok(summary) => (summary, None),
        Err(BenchError::Aborted { summary, source }) => (*summary, Some(*source)),
        Err(e) => return Err(e).context("Run aborted"),
    };

    if outputs.write_summary {
        let path = driver.persist_summary(&summary).await?;
        info!(path = %path.display(), "Summary written");
    }

    if let Some(path) = &outputs.metrics_file {
        let text = bench_telemetry::encode_metrics()?;
        tokio::fs::write(path, text)
            .await
            .with_context(|| format!("Failed to write metrics to {}", path.display()))?;
    }

    if outputs.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        print!("{}", summary.render_table());
    }

    if let Some(source) = abort {
        return Err(anyhow::Error::new(source).context("Run aborted"));
    }
    if !summary.is_success() {
        bail!(
            "{} of {} invocations failed",
            summary.failures.len(),
            summary.invocation_count()
        );
    }
    Ok(())
}

pub async fn mint(config: BenchConfig, content: &str, network: &str, json: bool) -> Result<()> {
    let credential = load_credential()?;
    let record = driver(config)
        .mint_content(content, network, &credential)
        .await
        .with_context(|| format!("Minting {} on {} failed", content, network))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&record)?);
    } else {
        print_record(&record);
    }
    Ok(())
}

pub fn list_content(config: &BenchConfig, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(&config.content)?);
        return Ok(());
    }

    for item in config.content.iter() {
        println!(
            "{}\t{}\t{} bytes\t{}",
            item.key,
            item.name,
            item.payload_len(),
            item.description
        );
    }
    Ok(())
}

fn print_record(record: &RunRecord) {
    println!("network:   {}", record.network);
    println!("title:     {}", record.title);
    println!("length:    {}", record.length);
    println!(
        "gas used:  {}",
        record
            .receipt
            .gas_used
            .map_or_else(|| "n/a".to_string(), |g| g.to_string())
    );
    if let Some(cost) = record.receipt.cost_wei() {
        println!("cost wei:  {}", cost);
    }
    if let Some(hash) = &record.receipt.transaction_hash {
        println!("tx hash:   {}", hash);
    }
    println!("output:    {}", record.result_path.display());
}
