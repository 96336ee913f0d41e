//! # Process Flows
//!
//! The driver with the real [`ProcessToolRunner`], pointed at a stub
//! `cast` script written into a temp directory. Verifies what crosses the
//! process boundary: argument vector, signer handed over through
//! `ETH_KEYSTORE` / `ETH_PASSWORD`, exit status and captured stdout.
//!
//! [`ProcessToolRunner`]: mint_bench::ProcessToolRunner

#[cfg(all(test, unix))]
mod tests {
    use std::os::unix::fs::PermissionsExt;
    use std::path::{Path, PathBuf};

    use mint_bench::{
        decrypt_keystore, BenchConfig, BenchError, BenchmarkApi, BenchmarkDriver,
        EncryptedKeystore, FileResultSink, ProcessToolRunner,
    };

    use crate::integration::driver_flows::{runnable_config, test_key, TEST_KEY};

    /// Accepts a signer the way `cast` does: a raw key in the environment
    /// or on the command line is refused, `ETH_KEYSTORE` and `ETH_PASSWORD`
    /// must name readable files. Copies both into `@CAPTURE@` and prints a
    /// receipt, the keystore path and its argument count.
    const STUB_CAST: &str = r#"#!/bin/sh
if [ -n "$ETH_PRIVATE_KEY" ]; then
    echo "Error: unexpected raw key in environment" >&2
    exit 3
fi
for arg in "$@"; do
    case "$arg" in
        --private-key*)
            echo "Error: unexpected raw key on command line" >&2
            exit 3
            ;;
        --fail)
            echo "Error: (code: -32000, message: insufficient funds for gas * price + value)" >&2
            exit 1
            ;;
    esac
done
if [ ! -r "$ETH_KEYSTORE" ] || [ ! -r "$ETH_PASSWORD" ]; then
    echo "Error: no signer configured" >&2
    exit 2
fi
cp "$ETH_KEYSTORE" "@CAPTURE@/keystore-$$.json"
cp "$ETH_PASSWORD" "@CAPTURE@/password-$$"
echo "gasUsed             98765"
echo "effectiveGasPrice   0x3b9aca00"
echo "status              1 (success)"
echo "keystore            $ETH_KEYSTORE"
echo "argCount            $#"
"#;

    const STUB_SLOW: &str = "#!/bin/sh\nsleep 10\n";

    fn install_stub(dir: &Path, name: &str, body: &str) -> PathBuf {
        let path = dir.join(name);
        std::fs::write(&path, body).unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
        path
    }

    /// Stub `cast` that copies its signer files into `capture`.
    fn install_cast(dir: &Path, capture: &Path) -> PathBuf {
        std::fs::create_dir_all(capture).unwrap();
        let body = STUB_CAST.replace("@CAPTURE@", &capture.display().to_string());
        install_stub(dir, "cast", &body)
    }

    /// Value printed after `label` in a stub result file.
    fn field<'a>(text: &'a str, label: &str) -> Option<&'a str> {
        text.lines()
            .find_map(|line| line.strip_prefix(label))
            .map(str::trim)
    }

    fn process_driver(config: BenchConfig) -> BenchmarkDriver<ProcessToolRunner, FileResultSink> {
        let runner = ProcessToolRunner::new().with_timeout(config.timeout());
        BenchmarkDriver::new(config, runner, FileResultSink::new())
    }

    // =========================================================================
    // Happy path
    // =========================================================================

    #[tokio::test]
    async fn test_stub_tool_receives_openable_keystore() {
        let dir = tempfile::tempdir().unwrap();
        let capture = dir.path().join("capture");
        let stub = install_cast(dir.path(), &capture);

        let mut config = runnable_config(&dir.path().join("results"));
        config.tool = stub.display().to_string();
        config.select_networks(&["polygon".to_string(), "arbitrum".to_string()]).unwrap();
        let driver = process_driver(config);

        let summary = driver.run(&test_key()).await.unwrap();
        assert_eq!(summary.records.len(), 6);

        for record in &summary.records {
            assert_eq!(record.exit_code, Some(0));
            assert_eq!(record.receipt.gas_used, Some(98_765));
            assert_eq!(record.receipt.effective_gas_price, Some(1_000_000_000));
            assert_eq!(record.receipt.status_ok, Some(true));
            assert!(!record.invocation.contains(TEST_KEY));
        }

        let polygon = std::fs::read_to_string(
            dir.path().join("results/polygon/mint-StandardName-0.txt"),
        )
        .unwrap();
        assert!(!polygon.contains(&TEST_KEY[2..]));

        // send, contract, signature, 7 mint arguments, --rpc-url, url
        assert_eq!(field(&polygon, "argCount"), Some("12"));
        let arbitrum = std::fs::read_to_string(
            dir.path().join("results/arbitrum/mint-StandardName-0.txt"),
        )
        .unwrap();
        assert_eq!(field(&arbitrum, "argCount"), Some("13"));
    }

    #[tokio::test]
    async fn test_captured_keystore_opens_to_the_key() {
        let dir = tempfile::tempdir().unwrap();
        let capture = dir.path().join("capture");
        let stub = install_cast(dir.path(), &capture);

        let mut config = runnable_config(&dir.path().join("results"));
        config.tool = stub.display().to_string();
        config.lengths = vec![0];
        let driver = process_driver(config);

        let summary = driver.run(&test_key()).await.unwrap();
        assert_eq!(summary.records.len(), 3);

        let mut opened = 0;
        for entry in std::fs::read_dir(&capture).unwrap() {
            let path = entry.unwrap().path();
            let name = path.file_name().unwrap().to_str().unwrap().to_string();
            let Some(pid) = name
                .strip_prefix("keystore-")
                .and_then(|rest| rest.strip_suffix(".json"))
            else {
                continue;
            };

            let text = std::fs::read_to_string(&path).unwrap();
            assert!(!text.contains(&TEST_KEY[2..]));
            let keystore: EncryptedKeystore = serde_json::from_str(&text).unwrap();
            let password = std::fs::read(capture.join(format!("password-{pid}"))).unwrap();
            assert_eq!(decrypt_keystore(&keystore, &password).unwrap(), test_key());
            opened += 1;
        }
        assert_eq!(opened, 3);
    }

    #[tokio::test]
    async fn test_signer_files_gone_after_each_invocation() {
        let dir = tempfile::tempdir().unwrap();
        let capture = dir.path().join("capture");
        let stub = install_cast(dir.path(), &capture);

        let mut config = runnable_config(&dir.path().join("results"));
        config.tool = stub.display().to_string();
        config.lengths = vec![0];
        config.select_networks(&["optimism".to_string()]).unwrap();
        let driver = process_driver(config);

        driver.run(&test_key()).await.unwrap();

        let text = std::fs::read_to_string(
            dir.path().join("results/optimism/mint-StandardName-0.txt"),
        )
        .unwrap();
        let keystore = PathBuf::from(field(&text, "keystore").unwrap());
        assert!(keystore.is_absolute());
        assert!(!keystore.exists());
        assert!(!keystore.parent().unwrap().exists());
    }

    // =========================================================================
    // Failure paths
    // =========================================================================

    #[tokio::test]
    async fn test_non_zero_exit_is_reported_and_not_recorded() {
        let dir = tempfile::tempdir().unwrap();
        let stub = install_cast(dir.path(), &dir.path().join("capture"));

        let mut config = runnable_config(&dir.path().join("results"));
        config.tool = stub.display().to_string();
        config.networks[1].extra_args.push("--fail".to_string());
        let driver = process_driver(config);

        let err = driver.run(&test_key()).await.unwrap_err();
        match err.root_cause() {
            BenchError::ToolFailed {
                network,
                length,
                code,
                stderr,
            } => {
                assert_eq!(network, "arbitrum");
                assert_eq!(*length, 0);
                assert_eq!(*code, Some(1));
                assert!(stderr.contains("insufficient funds"));
            }
            other => panic!("expected ToolFailed, got {other:?}"),
        }

        assert!(dir.path().join("results/polygon/mint-StandardName-500.txt").exists());
        assert!(!dir.path().join("results/arbitrum").exists());
        assert!(!dir.path().join("results/optimism").exists());
    }

    #[tokio::test]
    async fn test_missing_tool_is_fatal_even_with_keep_going() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = runnable_config(&dir.path().join("results"));
        config.tool = dir.path().join("no-such-cast").display().to_string();
        config.keep_going = true;
        let driver = process_driver(config);

        let err = driver.run(&test_key()).await.unwrap_err();
        assert!(matches!(err.root_cause(), BenchError::Spawn { .. }));
        assert!(!err.is_recoverable());
    }

    #[tokio::test]
    async fn test_timeout_kills_tool_and_continues_with_keep_going() {
        let dir = tempfile::tempdir().unwrap();
        let stub = install_stub(dir.path(), "slow-cast", STUB_SLOW);

        let mut config = runnable_config(&dir.path().join("results"));
        config.tool = stub.display().to_string();
        config.timeout_secs = Some(1);
        config.keep_going = true;
        config.lengths = vec![0];
        config.select_networks(&["optimism".to_string()]).unwrap();
        let driver = process_driver(config);

        let summary = driver.run(&test_key()).await.unwrap();
        assert!(summary.records.is_empty());
        assert_eq!(summary.failures.len(), 1);
        assert!(summary.failures[0].error.contains("timed out"));
        assert!(!dir.path().join("results/optimism").exists());
    }
}
