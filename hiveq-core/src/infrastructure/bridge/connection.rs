// hiveq-core/src/infrastructure/bridge/connection.rs

use jni::JNIEnv;
use jni::errors::Error as JniError;
use jni::objects::{GlobalRef, JObject, JValue};
use tracing::{debug, info, instrument, warn};

use crate::domain::{ConnectionConfig, Query, QueryResult, Value};
use crate::error::HiveqError;
use crate::infrastructure::bridge::java::{java_string, or_describe};
use crate::infrastructure::bridge::runtime::JvmBridge;
use crate::infrastructure::bridge::types::ColumnKind;
use crate::infrastructure::error::{BridgeError, InfrastructureError};
use crate::ports::connector::Connector;

// Local references created while reading one row.
const ROW_FRAME_CAPACITY: i32 = 32;

/// A live `java.sql.Connection` owned through a JNI global reference.
pub struct HiveConnection<'a> {
    bridge: &'a JvmBridge,
    handle: Option<GlobalRef>,
    server: String,
}

impl<'a> HiveConnection<'a> {
    #[instrument(skip_all, fields(server = %config.display_target(), auth = %config.auth))]
    pub fn open(bridge: &'a JvmBridge, config: &ConnectionConfig) -> Result<Self, InfrastructureError> {
        let mut env = bridge.env()?;
        let server = config.display_target();

        // JNI FindClass from an invocation thread goes through the system
        // class loader, which sees -Djava.class.path.
        let driver = instantiate_driver(&mut env, &config.driver_class);
        let driver = or_describe(&mut env, driver).map_err(|message| BridgeError::DriverClass {
            class: config.driver_class.clone(),
            message,
        })?;
        debug!(class = %config.driver_class, "Driver loaded");

        let connection = connect(&mut env, &driver, config);
        let connection = or_describe(&mut env, connection)
            .and_then(|conn| conn.ok_or_else(|| "the driver does not accept this JDBC URL".to_string()))
            .map_err(|message| BridgeError::Connect {
                target: server.clone(),
                message,
            })?;

        info!("🔌 Connected to {}", server);
        Ok(Self {
            bridge,
            handle: Some(connection),
            server,
        })
    }
}

fn instantiate_driver<'local>(env: &mut JNIEnv<'local>, class_name: &str) -> Result<JObject<'local>, JniError> {
    let class = env.find_class(class_name.replace('.', "/"))?;
    env.new_object(&class, "()V", &[])
}

/// `Driver.connect(url, props)`. `None` when the driver rejects the URL.
fn connect(
    env: &mut JNIEnv<'_>,
    driver: &JObject<'_>,
    config: &ConnectionConfig,
) -> Result<Option<GlobalRef>, JniError> {
    let props = env.new_object("java/util/Properties", "()V", &[])?;
    set_property(env, &props, "user", &config.username)?;
    if let Some(password) = &config.password {
        set_property(env, &props, "password", password)?;
    }

    let url = env.new_string(config.jdbc_url())?;
    let conn = env
        .call_method(
            driver,
            "connect",
            "(Ljava/lang/String;Ljava/util/Properties;)Ljava/sql/Connection;",
            &[JValue::Object(&url), JValue::Object(&props)],
        )?
        .l()?;
    if conn.is_null() {
        return Ok(None);
    }
    env.new_global_ref(conn).map(Some)
}

fn set_property(env: &mut JNIEnv<'_>, props: &JObject<'_>, key: &str, value: &str) -> Result<(), JniError> {
    let key = env.new_string(key)?;
    let value = env.new_string(value)?;
    env.call_method(
        props,
        "setProperty",
        "(Ljava/lang/String;Ljava/lang/String;)Ljava/lang/Object;",
        &[JValue::Object(&key), JValue::Object(&value)],
    )?;
    Ok(())
}

/// `Statement.execute`, then every row of the result set, if there is one.
fn run_statement(env: &mut JNIEnv<'_>, stmt: &JObject<'_>, sql: &str) -> Result<QueryResult, JniError> {
    let sql = env.new_string(sql)?;
    let has_result_set = env
        .call_method(stmt, "execute", "(Ljava/lang/String;)Z", &[JValue::Object(&sql)])?
        .z()?;
    if !has_result_set {
        return Ok(QueryResult::no_result_set());
    }

    let rs = env
        .call_method(stmt, "getResultSet", "()Ljava/sql/ResultSet;", &[])?
        .l()?;
    let meta = env
        .call_method(&rs, "getMetaData", "()Ljava/sql/ResultSetMetaData;", &[])?
        .l()?;
    let count = env.call_method(&meta, "getColumnCount", "()I", &[])?.i()?;

    let mut columns = Vec::with_capacity(count.max(0) as usize);
    let mut kinds = Vec::with_capacity(count.max(0) as usize);
    for index in 1..=count {
        let label = env
            .call_method(&meta, "getColumnLabel", "(I)Ljava/lang/String;", &[JValue::Int(index)])?
            .l()?;
        columns.push(java_string(env, label)?.unwrap_or_default());

        let sql_type = env
            .call_method(&meta, "getColumnType", "(I)I", &[JValue::Int(index)])?
            .i()?;
        kinds.push(ColumnKind::from_sql_type(sql_type));
    }

    let mut rows = Vec::new();
    while env.call_method(&rs, "next", "()Z", &[])?.z()? {
        let row = env.with_local_frame(ROW_FRAME_CAPACITY, |env| read_row(env, &rs, &kinds))?;
        rows.push(row);
    }
    env.call_method(&rs, "close", "()V", &[])?;

    Ok(QueryResult::new(columns, rows))
}

fn read_row(env: &mut JNIEnv<'_>, rs: &JObject<'_>, kinds: &[ColumnKind]) -> Result<Vec<Value>, JniError> {
    let mut row = Vec::with_capacity(kinds.len());
    for (offset, kind) in kinds.iter().enumerate() {
        let index = offset as i32 + 1;
        let value = match kind {
            ColumnKind::Bool => {
                let v = env.call_method(rs, "getBoolean", "(I)Z", &[JValue::Int(index)])?.z()?;
                if was_null(env, rs)? { Value::Null } else { Value::Bool(v) }
            }
            ColumnKind::Int => {
                let v = env.call_method(rs, "getLong", "(I)J", &[JValue::Int(index)])?.j()?;
                if was_null(env, rs)? { Value::Null } else { Value::Int(v) }
            }
            ColumnKind::Float => {
                let v = env.call_method(rs, "getDouble", "(I)D", &[JValue::Int(index)])?.d()?;
                if was_null(env, rs)? { Value::Null } else { Value::Float(v) }
            }
            ColumnKind::Text => {
                let obj = env
                    .call_method(rs, "getString", "(I)Ljava/lang/String;", &[JValue::Int(index)])?
                    .l()?;
                java_string(env, obj)?.map(Value::Text).unwrap_or(Value::Null)
            }
        };
        row.push(value);
    }
    Ok(row)
}

// Primitive getters return 0/false for SQL NULL.
fn was_null(env: &mut JNIEnv<'_>, rs: &JObject<'_>) -> Result<bool, JniError> {
    env.call_method(rs, "wasNull", "()Z", &[])?.z()
}

impl Connector for HiveConnection<'_> {
    fn execute(&mut self, query: &Query) -> Result<QueryResult, HiveqError> {
        let handle = self
            .handle
            .as_ref()
            .ok_or_else(|| InfrastructureError::Query("connection is already closed".into()))?;
        let mut env = self.bridge.env()?;

        let stmt = env
            .call_method(handle.as_obj(), "createStatement", "()Ljava/sql/Statement;", &[])
            .and_then(|v| v.l());
        let stmt = or_describe(&mut env, stmt).map_err(InfrastructureError::Query)?;

        let outcome = run_statement(&mut env, &stmt, query.as_str());
        let outcome = or_describe(&mut env, outcome);

        let closed = env.call_method(&stmt, "close", "()V", &[]).map(|_| ());
        if let Err(message) = or_describe(&mut env, closed) {
            warn!(%message, "Failed to close statement");
        }

        outcome.map_err(|message| InfrastructureError::Query(message).into())
    }

    fn close(&mut self) -> Result<(), HiveqError> {
        let Some(handle) = self.handle.take() else {
            return Ok(());
        };
        let mut env = self.bridge.env()?;
        let closed = env.call_method(handle.as_obj(), "close", "()V", &[]).map(|_| ());
        or_describe(&mut env, closed).map_err(|message| {
            BridgeError::Jni(format!("closing connection to '{}': {}", self.server, message))
        })
        .map_err(InfrastructureError::from)?;
        debug!(server = %self.server, "Connection closed");
        Ok(())
    }

    fn engine_name(&self) -> &str {
        "hive-jdbc"
    }
}

impl Drop for HiveConnection<'_> {
    fn drop(&mut self) {
        if let Err(e) = self.close() {
            warn!("Failed to close Hive connection: {}", e);
        }
    }
}
