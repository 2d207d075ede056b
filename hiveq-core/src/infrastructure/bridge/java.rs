// hiveq-core/src/infrastructure/bridge/java.rs
//
// Small helpers around raw JNI calls.

use jni::JNIEnv;
use jni::errors::Error as JniError;
use jni::objects::{JObject, JString};

/// Java `String` -> Rust `String`; `None` for a null reference.
pub(crate) fn java_string<'local>(
    env: &mut JNIEnv<'local>,
    obj: JObject<'local>,
) -> Result<Option<String>, JniError> {
    if obj.is_null() {
        return Ok(None);
    }
    let jstr = JString::from(obj);
    let text: String = env.get_string(&jstr)?.into();
    Ok(Some(text))
}

/// Turns a failed call into a message. A pending Java exception is cleared
/// and its message used, so the driver's own wording reaches the user.
pub(crate) fn or_describe<T>(env: &mut JNIEnv<'_>, result: Result<T, JniError>) -> Result<T, String> {
    result.map_err(|err| match err {
        JniError::JavaException => take_exception_message(env).unwrap_or_else(|| err.to_string()),
        other => other.to_string(),
    })
}

fn take_exception_message(env: &mut JNIEnv<'_>) -> Option<String> {
    let throwable = env.exception_occurred().ok()?;
    env.exception_clear().ok()?;
    if throwable.is_null() {
        return None;
    }

    let message = env
        .call_method(&throwable, "getMessage", "()Ljava/lang/String;", &[])
        .and_then(|v| v.l())
        .ok()?;
    let text = if message.is_null() {
        env.call_method(&throwable, "toString", "()Ljava/lang/String;", &[])
            .and_then(|v| v.l())
            .ok()?
    } else {
        message
    };
    java_string(env, text).ok().flatten()
}
