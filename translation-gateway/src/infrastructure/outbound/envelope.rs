use serde_json::Value;

/// `{"data": ...}` 形式のレスポンスを展開する
///
/// トップレベルが `data` キーを持つオブジェクトならその値を、それ以外はそのまま返す。
pub fn unwrap_envelope(value: Value) -> Value {
    match value {
        Value::Object(mut map) => match map.remove("data") {
            Some(data) => data,
            None => Value::Object(map),
        },
        other => other,
    }
}
