// hiveq-core/src/infrastructure/bridge/runtime.rs

use std::ffi::OsString;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};

use jni::{InitArgsBuilder, JNIEnv, JNIVersion, JavaVM};
use tracing::{debug, info, instrument};

use crate::domain::ConnectionConfig;
use crate::error::HiveqError;
use crate::infrastructure::bridge::connection::HiveConnection;
use crate::infrastructure::error::{BridgeError, InfrastructureError};
use crate::ports::connector::{ConnectionOpener, Connector};

/// A JVM can be created only once per process, even after it is destroyed.
static RUNTIME_SLOT: OneShot = OneShot::new();

/// One-shot flag: the first `claim` wins until `release`.
pub(crate) struct OneShot(AtomicBool);

impl OneShot {
    pub(crate) const fn new() -> Self {
        Self(AtomicBool::new(false))
    }

    pub(crate) fn claim(&self) -> bool {
        self.0
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_ok()
    }

    pub(crate) fn release(&self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

/// What the JVM needs to know before it boots.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BridgeOptions {
    pub driver_jar: Option<PathBuf>,
    pub extra_class_path: Vec<PathBuf>,
    pub jvm_options: Vec<String>,
}

impl BridgeOptions {
    /// Driver jar from the config plus whatever `CLASSPATH` already lists.
    pub fn from_config(config: &ConnectionConfig) -> Self {
        let extra_class_path = std::env::var_os("CLASSPATH")
            .map(|cp| std::env::split_paths(&cp).collect())
            .unwrap_or_default();
        Self {
            driver_jar: config.driver_jar.clone(),
            extra_class_path,
            jvm_options: config.jvm_options.clone(),
        }
    }

    fn class_path(&self) -> Vec<PathBuf> {
        self.driver_jar
            .iter()
            .chain(self.extra_class_path.iter())
            .filter(|p| !p.as_os_str().is_empty())
            .cloned()
            .collect()
    }

    /// `-Djava.class.path=...`, or `None` when nothing is configured.
    pub(crate) fn class_path_option(&self) -> Result<Option<String>, BridgeError> {
        let entries = self.class_path();
        if entries.is_empty() {
            return Ok(None);
        }
        let joined: OsString = std::env::join_paths(entries)
            .map_err(|e| BridgeError::StartFailed(format!("invalid class path: {}", e)))?;
        let joined = joined
            .into_string()
            .map_err(|_| BridgeError::StartFailed("class path is not valid UTF-8".into()))?;
        Ok(Some(format!("-Djava.class.path={}", joined)))
    }
}

/// Handle on the process-wide JVM. Created once in `main` and passed down.
pub struct JvmBridge {
    vm: JavaVM,
}

impl JvmBridge {
    #[instrument(skip_all)]
    pub fn start(options: &BridgeOptions) -> Result<Self, InfrastructureError> {
        if let Some(jar) = &options.driver_jar {
            if !jar.is_file() {
                return Err(BridgeError::DriverJarMissing(jar.display().to_string()).into());
            }
        }

        if !RUNTIME_SLOT.claim() {
            return Err(BridgeError::AlreadyStarted.into());
        }

        match Self::launch(options) {
            Ok(vm) => {
                info!("☕ JVM bridge started");
                Ok(Self { vm })
            }
            Err(e) => {
                // Nothing was created, a later attempt may still succeed.
                RUNTIME_SLOT.release();
                Err(e.into())
            }
        }
    }

    fn launch(options: &BridgeOptions) -> Result<JavaVM, BridgeError> {
        let class_path = options.class_path_option()?;

        let mut builder = InitArgsBuilder::new()
            .version(JNIVersion::V8)
            .ignore_unrecognized(false);
        if let Some(cp) = &class_path {
            debug!(option = %cp, "JVM class path");
            builder = builder.option(cp.as_str());
        }
        for opt in &options.jvm_options {
            builder = builder.option(opt.as_str());
        }

        let args = builder
            .build()
            .map_err(|e| BridgeError::StartFailed(e.to_string()))?;
        JavaVM::new(args).map_err(|e| BridgeError::StartFailed(e.to_string()))
    }

    /// JNI environment for the calling thread (attached on first use).
    pub(crate) fn env(&self) -> Result<JNIEnv<'_>, InfrastructureError> {
        self.vm
            .attach_current_thread_permanently()
            .map_err(InfrastructureError::from)
    }
}

impl ConnectionOpener for JvmBridge {
    fn open<'a>(&'a self, config: &ConnectionConfig) -> Result<Box<dyn Connector + 'a>, HiveqError> {
        let connection = HiveConnection::open(self, config)?;
        Ok(Box::new(connection))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{AuthMechanism, Endpoint};
    use anyhow::Result;
    use tempfile::tempdir;

    #[test]
    fn test_one_shot_guard() {
        let slot = OneShot::new();
        assert!(slot.claim());
        assert!(!slot.claim());
        slot.release();
        assert!(slot.claim());
    }

    #[test]
    fn test_class_path_option() -> Result<()> {
        let options = BridgeOptions {
            driver_jar: Some(PathBuf::from("/opt/hive/hive-jdbc.jar")),
            extra_class_path: vec![PathBuf::from("/opt/extra.jar")],
            jvm_options: vec![],
        };
        let option = options.class_path_option()?.unwrap_or_default();
        assert!(option.starts_with("-Djava.class.path=/opt/hive/hive-jdbc.jar"));
        assert!(option.ends_with("/opt/extra.jar"));

        assert_eq!(BridgeOptions::default().class_path_option()?, None);
        Ok(())
    }

    #[test]
    fn test_missing_driver_jar_fails_before_jvm_start() -> Result<()> {
        let dir = tempdir()?;
        let options = BridgeOptions {
            driver_jar: Some(dir.path().join("absent.jar")),
            ..BridgeOptions::default()
        };

        let err = JvmBridge::start(&options)
            .err()
            .ok_or_else(|| anyhow::anyhow!("start should fail"))?;

        assert!(matches!(
            err,
            InfrastructureError::Bridge(BridgeError::DriverJarMissing(_))
        ));
        assert_eq!(err.kind(), crate::ErrorKind::Connection);
        Ok(())
    }

    fn local_config(driver_class: &str) -> ConnectionConfig {
        ConnectionConfig {
            endpoint: Endpoint::HostPort {
                host: "localhost".into(),
                port: 10000,
            },
            driver_class: driver_class.into(),
            username: "analyst".into(),
            password: None,
            driver_jar: None,
            database: None,
            auth: AuthMechanism::None,
            kerberos_principal: None,
            jvm_options: vec![],
        }
    }

    fn bridge_error(result: Result<Box<dyn Connector + '_>, HiveqError>) -> Result<BridgeError> {
        match result {
            Ok(_) => anyhow::bail!("open should fail"),
            Err(HiveqError::Infrastructure(InfrastructureError::Bridge(e))) => Ok(e),
            Err(other) => anyhow::bail!("unexpected error: {}", other),
        }
    }

    // Only test in this crate that boots a JVM: one per process.
    #[test]
    fn test_jvm_bridge_lifecycle() -> Result<()> {
        if std::env::var_os("JAVA_HOME").is_none() {
            eprintln!("JAVA_HOME is not set, skipping JVM bridge test");
            return Ok(());
        }

        let bridge = JvmBridge::start(&BridgeOptions::default())?;

        let second = JvmBridge::start(&BridgeOptions::default())
            .err()
            .ok_or_else(|| anyhow::anyhow!("second start should fail"))?;
        assert!(matches!(
            second,
            InfrastructureError::Bridge(BridgeError::AlreadyStarted)
        ));
        assert_eq!(second.kind(), crate::ErrorKind::Connection);

        // The Java exception is cleared each time, so a retry fails the same way.
        for _ in 0..2 {
            let result = bridge.open(&local_config("org.example.MissingDriver"));
            let err = result.as_ref().err().map(|e| e.kind());
            assert_eq!(err, Some(crate::ErrorKind::Connection));
            match bridge_error(result)? {
                BridgeError::DriverClass { class, message } => {
                    assert_eq!(class, "org.example.MissingDriver");
                    assert!(message.contains("org/example/MissingDriver"), "{}", message);
                }
                other => anyhow::bail!("unexpected bridge error: {}", other),
            }
        }

        // Loads fine but has no `connect`: the NoSuchMethodError surfaces as a connect failure.
        match bridge_error(bridge.open(&local_config("java.lang.Object")))? {
            BridgeError::Connect { target, message } => {
                assert_eq!(target, "localhost:10000");
                assert!(!message.is_empty());
            }
            other => anyhow::bail!("unexpected bridge error: {}", other),
        }

        let env = bridge.env()?;
        assert!(!env.exception_check()?);
        Ok(())
    }
}
