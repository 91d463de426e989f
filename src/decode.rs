//! Общий слой чтения JSON для всех сущностей API.
//!
//! Сущность получает свои поля через [`Fields`], который один раз
//! реализует проверки присутствия и типов. Ошибка возвращается первая
//! встреченная: обязательные скалярные поля читаются раньше вложенных.

use std::borrow::Cow;
use std::collections::BTreeMap;

use serde_json::{Map, Value};

use crate::error::{DecodeError, DecodeResult};

pub type Object = Map<String, Value>;

/// Входные данные декодера: готовое JSON значение или JSON текст
#[derive(Debug, Clone, Copy)]
pub enum JsonInput<'a> {
    Value(&'a Value),
    Text(&'a str),
}

impl<'a> From<&'a Value> for JsonInput<'a> {
    fn from(value: &'a Value) -> Self {
        JsonInput::Value(value)
    }
}

impl<'a> From<&'a str> for JsonInput<'a> {
    fn from(text: &'a str) -> Self {
        JsonInput::Text(text)
    }
}

impl<'a> From<&'a String> for JsonInput<'a> {
    fn from(text: &'a String) -> Self {
        JsonInput::Text(text.as_str())
    }
}

impl<'a> JsonInput<'a> {
    /// Приводит вход к JSON объекту.
    ///
    /// Строка (в том числе JSON строка внутри значения) разбирается как
    /// JSON текст. Всё, что не стало объектом, даёт `MalformedInput`.
    pub fn into_object(self) -> DecodeResult<Cow<'a, Object>> {
        match self {
            JsonInput::Value(Value::Object(map)) => Ok(Cow::Borrowed(map)),
            JsonInput::Value(Value::String(text)) => parse_object(text).map(Cow::Owned),
            JsonInput::Text(text) => parse_object(text).map(Cow::Owned),
            JsonInput::Value(_) => Err(DecodeError::MalformedInput),
        }
    }
}

fn parse_object(text: &str) -> DecodeResult<Object> {
    match serde_json::from_str::<Value>(text) {
        Ok(Value::Object(map)) => Ok(map),
        _ => Err(DecodeError::MalformedInput),
    }
}

/// Сущность, которую можно собрать из JSON объекта
pub trait FromJson: Sized {
    fn from_fields(fields: &Fields<'_>) -> DecodeResult<Self>;

    fn from_json<'a>(input: impl Into<JsonInput<'a>>) -> DecodeResult<Self> {
        let object = input.into().into_object()?;
        Self::from_fields(&Fields::new(&object))
    }
}

/// Скалярные типы, которые встречаются в полях API
pub trait Primitive: Sized {
    const EXPECTED: &'static str;

    fn from_value(value: &Value) -> Option<Self>;
}

impl Primitive for String {
    const EXPECTED: &'static str = "string";

    fn from_value(value: &Value) -> Option<Self> {
        value.as_str().map(str::to_owned)
    }
}

impl Primitive for i64 {
    const EXPECTED: &'static str = "integer";

    fn from_value(value: &Value) -> Option<Self> {
        value.as_i64()
    }
}

impl Primitive for bool {
    const EXPECTED: &'static str = "boolean";

    fn from_value(value: &Value) -> Option<Self> {
        value.as_bool()
    }
}

pub(crate) fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn mismatch(key: &str, expected: &'static str, value: &Value) -> DecodeError {
    DecodeError::TypeMismatch {
        key: key.to_string(),
        expected,
        actual: type_name(value),
    }
}

/// Типизированный доступ к полям JSON объекта.
///
/// Ключи передаются в том виде, в каком они приходят по сети (camelCase).
/// `null` у необязательного поля считается отсутствием поля.
#[derive(Debug, Clone, Copy)]
pub struct Fields<'a> {
    map: &'a Object,
}

impl<'a> Fields<'a> {
    pub fn new(map: &'a Object) -> Self {
        Fields { map }
    }

    fn lookup(&self, key: &'static str) -> DecodeResult<&'a Value> {
        self.map.get(key).ok_or(DecodeError::MissingField(key))
    }

    fn present(&self, key: &str) -> Option<&'a Value> {
        self.map.get(key).filter(|value| !value.is_null())
    }

    pub fn required<T: Primitive>(&self, key: &'static str) -> DecodeResult<T> {
        let value = self.lookup(key)?;
        T::from_value(value).ok_or_else(|| mismatch(key, T::EXPECTED, value))
    }

    pub fn optional<T: Primitive>(&self, key: &'static str) -> DecodeResult<Option<T>> {
        self.present(key)
            .map(|value| T::from_value(value).ok_or_else(|| mismatch(key, T::EXPECTED, value)))
            .transpose()
    }

    pub fn optional_value(&self, key: &'static str) -> Option<&'a Value> {
        self.present(key)
    }

    pub fn required_entity<T: FromJson>(&self, key: &'static str) -> DecodeResult<T> {
        let value = self.lookup(key)?;
        T::from_json(value).map_err(|e| DecodeError::nested(key, e))
    }

    pub fn optional_entity<T: FromJson>(&self, key: &'static str) -> DecodeResult<Option<T>> {
        self.present(key)
            .map(|value| T::from_json(value).map_err(|e| DecodeError::nested(key, e)))
            .transpose()
    }

    pub fn required_list<T: FromJson>(&self, key: &'static str) -> DecodeResult<Vec<T>> {
        decode_list(key, self.lookup(key)?)
    }

    pub fn optional_list<T: FromJson>(&self, key: &'static str) -> DecodeResult<Option<Vec<T>>> {
        self.present(key).map(|value| decode_list(key, value)).transpose()
    }

    pub fn required_map<T: FromJson>(
        &self,
        key: &'static str,
    ) -> DecodeResult<BTreeMap<String, T>> {
        decode_map(key, self.lookup(key)?)
    }

    pub fn optional_map<T: FromJson>(
        &self,
        key: &'static str,
    ) -> DecodeResult<Option<BTreeMap<String, T>>> {
        self.present(key).map(|value| decode_map(key, value)).transpose()
    }
}

fn decode_list<T: FromJson>(key: &str, value: &Value) -> DecodeResult<Vec<T>> {
    let items = value
        .as_array()
        .ok_or_else(|| mismatch(key, "array", value))?;

    items
        .iter()
        .enumerate()
        .map(|(index, item)| {
            T::from_json(item).map_err(|e| DecodeError::nested(format!("{key}[{index}]"), e))
        })
        .collect()
}

fn decode_map<T: FromJson>(key: &str, value: &Value) -> DecodeResult<BTreeMap<String, T>> {
    let entries = value
        .as_object()
        .ok_or_else(|| mismatch(key, "object", value))?;

    entries
        .iter()
        .map(|(id, item)| {
            T::from_json(item)
                .map(|decoded| (id.clone(), decoded))
                .map_err(|e| DecodeError::nested(format!("{key}.{id}"), e))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, PartialEq)]
    struct Pair {
        left: i64,
        right: Option<String>,
    }

    impl FromJson for Pair {
        fn from_fields(fields: &Fields<'_>) -> DecodeResult<Self> {
            Ok(Pair {
                left: fields.required("left")?,
                right: fields.optional("right")?,
            })
        }
    }

    #[test]
    fn accepts_object_and_text() {
        let value = json!({ "left": 1, "right": "r" });
        let from_value = Pair::from_json(&value).unwrap();
        let from_text = Pair::from_json(r#"{"left": 1, "right": "r"}"#).unwrap();
        assert_eq!(from_value, from_text);

        let embedded = Value::String(r#"{"left": 2}"#.to_string());
        assert_eq!(
            Pair::from_json(&embedded).unwrap(),
            Pair { left: 2, right: None }
        );
    }

    #[test]
    fn rejects_non_object_input() {
        assert_eq!(Pair::from_json(&json!(123)), Err(DecodeError::MalformedInput));
        assert_eq!(Pair::from_json(&json!([1, 2])), Err(DecodeError::MalformedInput));
        assert_eq!(Pair::from_json("not json"), Err(DecodeError::MalformedInput));
        assert_eq!(Pair::from_json("[1]"), Err(DecodeError::MalformedInput));
    }

    #[test]
    fn reports_missing_and_mistyped_fields() {
        assert_eq!(
            Pair::from_json(&json!({ "right": "r" })),
            Err(DecodeError::MissingField("left"))
        );
        assert_eq!(
            Pair::from_json(&json!({ "left": "1" })),
            Err(DecodeError::TypeMismatch {
                key: "left".to_string(),
                expected: "integer",
                actual: "string",
            })
        );
        assert_eq!(
            Pair::from_json(&json!({ "left": null })),
            Err(DecodeError::TypeMismatch {
                key: "left".to_string(),
                expected: "integer",
                actual: "null",
            })
        );
    }

    #[test]
    fn null_optional_is_absent_but_empty_string_is_present() {
        let absent = Pair::from_json(&json!({ "left": 1, "right": null })).unwrap();
        assert_eq!(absent.right, None);

        let empty = Pair::from_json(&json!({ "left": 1, "right": "" })).unwrap();
        assert_eq!(empty.right, Some(String::new()));
    }

    #[test]
    fn lists_fail_as_a_whole() {
        let value = json!({ "items": [{ "left": 1 }, { "left": true }] });
        let object = value.as_object().unwrap();
        let err = Fields::new(object).required_list::<Pair>("items").unwrap_err();
        assert_eq!(
            err,
            DecodeError::nested(
                "items[1]",
                DecodeError::TypeMismatch {
                    key: "left".to_string(),
                    expected: "integer",
                    actual: "boolean",
                }
            )
        );

        let value = json!({ "items": { "left": 1 } });
        let object = value.as_object().unwrap();
        assert!(matches!(
            Fields::new(object).required_list::<Pair>("items"),
            Err(DecodeError::TypeMismatch { expected: "array", actual: "object", .. })
        ));
    }

    #[test]
    fn maps_keep_keys() {
        let value = json!({ "byId": { "b": { "left": 2 }, "a": { "left": 1 } } });
        let object = value.as_object().unwrap();
        let map = Fields::new(object).required_map::<Pair>("byId").unwrap();
        assert_eq!(map.keys().collect::<Vec<_>>(), vec!["a", "b"]);
        assert_eq!(map["b"].left, 2);

        assert_eq!(Fields::new(object).optional_map::<Pair>("other"), Ok(None));
    }
}
