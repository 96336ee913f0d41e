//! # Driver Flows
//!
//! The benchmark driver wired to the real filesystem sink, with a mock
//! tool standing in for `cast`.
//!
//! ## Flows Covered
//!
//! ```text
//! TOML config ──→ BenchConfig ──→ plan() ──→ 9 entries
//!                      │
//!                      ↓
//!              run() ──→ MockToolRunner ──→ FileResultSink
//!                                                │
//!                                                ↓
//!                         <tmp>/<network>/mint-StandardName-<len>.txt
//! ```

use std::path::Path;

use mint_bench::{
    BenchConfig, BenchmarkApi, BenchmarkDriver, FileResultSink, MockToolRunner, PrivateKey,
};

/// Receipt text shaped like `cast send` output.
pub const CAST_RECEIPT: &str = "\
blockHash               0x3f1c2b6a9e0d4c7b8a5f6e3d2c1b0a99887766554433221100ffeeddccbbaa99
blockNumber             28112377
gasUsed                 151234
effectiveGasPrice       1500000000
status                  1 (success)
transactionHash         0x9a8b7c6d5e4f30211203f4e5d6c7b8a99a8b7c6d5e4f30211203f4e5d6c7b8a9
";

/// Throwaway signing key used across flows.
pub const TEST_KEY: &str = "0x4c0883a69102937d6231471b5dbb6204fe5129617082792ae468d01a3f362318";

/// Config with reachable-looking endpoints, results under `root`.
pub fn runnable_config(root: &Path) -> BenchConfig {
    let mut config = BenchConfig::default();
    config.results_dir = root.to_path_buf();
    for network in &mut config.networks {
        network.rpc_url = format!("https://{}.rpc.test/v2/key", network.name);
    }
    config
}

/// The shared test key.
pub fn test_key() -> PrivateKey {
    PrivateKey::new(TEST_KEY).expect("valid test key")
}

#[cfg(test)]
mod tests {
    use super::*;
    use mint_bench::{BenchError, ConfigError};

    fn driver(config: BenchConfig, runner: MockToolRunner) -> BenchmarkDriver<MockToolRunner, FileResultSink> {
        BenchmarkDriver::new(config, runner, FileResultSink::new())
    }

    // =========================================================================
    // Full run against the filesystem
    // =========================================================================

    #[tokio::test]
    async fn test_run_writes_one_file_per_network_and_length() {
        let dir = tempfile::tempdir().unwrap();
        let driver = driver(runnable_config(dir.path()), MockToolRunner::succeeding(CAST_RECEIPT));

        let summary = driver.run(&test_key()).await.unwrap();
        assert_eq!(summary.records.len(), 9);

        for network in ["polygon", "arbitrum", "optimism"] {
            for length in [0, 200, 500] {
                let path = dir
                    .path()
                    .join(network)
                    .join(format!("mint-StandardName-{}.txt", length));
                let text = std::fs::read_to_string(&path).unwrap();
                assert_eq!(text, CAST_RECEIPT, "unexpected contents in {}", path.display());
            }
        }
    }

    #[tokio::test]
    async fn test_result_files_accumulate_across_runs() {
        let dir = tempfile::tempdir().unwrap();
        let driver = driver(runnable_config(dir.path()), MockToolRunner::succeeding(CAST_RECEIPT));

        driver.run(&test_key()).await.unwrap();
        driver.run(&test_key()).await.unwrap();

        let text =
            std::fs::read_to_string(dir.path().join("arbitrum/mint-StandardName-200.txt")).unwrap();
        assert_eq!(text, format!("{CAST_RECEIPT}{CAST_RECEIPT}"));
    }

    #[tokio::test]
    async fn test_failed_network_leaves_no_result_files() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = runnable_config(dir.path());
        config.keep_going = true;
        let driver = driver(
            config,
            MockToolRunner::succeeding(CAST_RECEIPT).failing_on("https://optimism.rpc.test/v2/key"),
        );

        let summary = driver.run(&test_key()).await.unwrap();
        assert_eq!(summary.records.len(), 6);
        assert_eq!(summary.failures.len(), 3);
        assert!(summary.failures.iter().all(|f| f.network == "optimism"));

        assert!(dir.path().join("polygon/mint-StandardName-500.txt").exists());
        assert!(dir.path().join("arbitrum/mint-StandardName-500.txt").exists());
        assert!(!dir.path().join("optimism").exists());
    }

    #[tokio::test]
    async fn test_summary_file_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let driver = driver(runnable_config(dir.path()), MockToolRunner::succeeding(CAST_RECEIPT));

        let summary = driver.run(&test_key()).await.unwrap();
        let path = driver.persist_summary(&summary).await.unwrap();
        assert_eq!(path.parent(), Some(dir.path()));

        let json: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        let records = json["records"].as_array().unwrap();
        assert_eq!(records.len(), 9);
        assert_eq!(records[0]["network"], "polygon");
        assert_eq!(records[0]["receipt"]["gas_used"], 151234);

        // Raw tool output stays in the per-entry files only.
        assert!(records[0].get("output").is_none());
        assert!(!json.to_string().contains(TEST_KEY));
    }

    #[tokio::test]
    async fn test_aborted_run_keeps_partial_summary() {
        let dir = tempfile::tempdir().unwrap();
        let driver = driver(
            runnable_config(dir.path()),
            MockToolRunner::succeeding(CAST_RECEIPT).failing_on("https://arbitrum.rpc.test/v2/key"),
        );

        let err = driver.run(&test_key()).await.unwrap_err();
        assert!(matches!(
            err.root_cause(),
            BenchError::ToolFailed { network, length: 0, .. } if network == "arbitrum"
        ));

        let summary = err.partial_summary().expect("aborted run carries its summary");
        assert!(summary.finished_at.is_some());
        let path = driver.persist_summary(summary).await.unwrap();
        assert!(path.exists());

        let json: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(json["records"].as_array().unwrap().len(), 3);
        assert_eq!(json["failures"].as_array().unwrap().len(), 1);
        assert_eq!(json["failures"][0]["network"], "arbitrum");

        assert!(dir.path().join("polygon/mint-StandardName-500.txt").exists());
        assert!(!dir.path().join("arbitrum").exists());
        assert!(!dir.path().join("optimism").exists());
    }

    #[tokio::test]
    async fn test_run_is_reflected_in_metrics() {
        bench_telemetry::register_metrics().unwrap();
        let dir = tempfile::tempdir().unwrap();
        let mut config = runnable_config(dir.path());
        config.networks[0].name = "metricsnet".to_string();
        config.lengths = vec![200];
        config.select_networks(&["metricsnet".to_string()]).unwrap();
        let driver = driver(config, MockToolRunner::succeeding(CAST_RECEIPT));

        driver.run(&test_key()).await.unwrap();

        let text = bench_telemetry::encode_metrics().unwrap();
        assert!(text.contains("mb_invocations_total"));
        assert!(text.contains(r#"network="metricsnet""#));
        assert!(text.contains("mb_gas_used"));
    }

    // =========================================================================
    // Configuration layering
    // =========================================================================

    #[tokio::test]
    async fn test_toml_config_drives_the_run() {
        let dir = tempfile::tempdir().unwrap();
        let toml = format!(
            r#"
lengths = [1, 2]
results_dir = "{}"

[[networks]]
name = "devnet"
rpc_url = "http://127.0.0.1:8545"
extra_args = ["--legacy"]
"#,
            dir.path().display()
        );
        let path = dir.path().join("bench.toml");
        std::fs::write(&path, toml).unwrap();

        let config = BenchConfig::load(&path).unwrap();
        let driver = driver(config, MockToolRunner::succeeding(CAST_RECEIPT));

        let summary = driver.run(&test_key()).await.unwrap();
        assert_eq!(summary.records.len(), 2);
        assert!(dir.path().join("devnet/mint-StandardName-1.txt").exists());
        assert!(dir.path().join("devnet/mint-StandardName-2.txt").exists());
        assert!(driver
            .runner()
            .invocations()
            .iter()
            .all(|inv| inv.has_arg("--legacy")));
    }

    #[tokio::test]
    async fn test_env_endpoint_override_unblocks_placeholder() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = BenchConfig::default();
        config.results_dir = dir.path().to_path_buf();
        config.select_networks(&["polygon".to_string()]).unwrap();

        assert!(matches!(
            config.validate_for_run(),
            Err(ConfigError::PlaceholderEndpoint { .. })
        ));

        config.apply_env_with(|var| {
            (var == "MINT_BENCH_RPC_POLYGON").then(|| "https://polygon.rpc.test".to_string())
        });
        let driver = driver(config, MockToolRunner::succeeding(CAST_RECEIPT));

        let summary = driver.run(&test_key()).await.unwrap();
        assert_eq!(summary.records.len(), 3);
    }

    #[tokio::test]
    async fn test_placeholder_endpoints_abort_before_touching_disk() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = BenchConfig::default();
        config.results_dir = dir.path().join("results");
        let driver = driver(config, MockToolRunner::succeeding(CAST_RECEIPT));

        assert_eq!(driver.plan().len(), 9);
        let err = driver.run(&test_key()).await.unwrap_err();
        assert!(matches!(err, BenchError::Config(_)));
        assert!(!dir.path().join("results").exists());
    }

    // =========================================================================
    // Single content mint
    // =========================================================================

    #[tokio::test]
    async fn test_mint_content_writes_titled_result_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = runnable_config(dir.path());
        let bytes = config.content.get("fifth").unwrap().payload_len();
        let driver = driver(config, MockToolRunner::succeeding(CAST_RECEIPT));

        let record = driver
            .mint_content("fifth", "arbitrum", &test_key())
            .await
            .unwrap();
        assert_eq!(record.length, bytes);
        assert_eq!(
            record.result_path,
            dir.path()
                .join("arbitrum")
                .join(format!("mint-TheFifthAmendment-{}.txt", bytes))
        );
        assert_eq!(std::fs::read_to_string(&record.result_path).unwrap(), CAST_RECEIPT);
    }
}
