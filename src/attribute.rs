use crate::error::ShrinkError;
use crate::model::Record;
use rusoto_dynamodb::AttributeValue;
use serde_json::{Number, Value};
use std::collections::HashMap;

pub type Item = HashMap<String, AttributeValue>;

/// Converts a JSON record into a DynamoDB attribute map.
pub fn to_item(record: &Record) -> Item {
    record
        .iter()
        .map(|(name, value)| (name.clone(), to_attribute(value)))
        .collect()
}

pub fn to_attribute(value: &Value) -> AttributeValue {
    match value {
        Value::Null => AttributeValue {
            null: Some(true),
            ..AttributeValue::default()
        },
        Value::Bool(flag) => AttributeValue {
            bool: Some(*flag),
            ..AttributeValue::default()
        },
        Value::Number(number) => AttributeValue {
            n: Some(number.to_string()),
            ..AttributeValue::default()
        },
        Value::String(text) => AttributeValue {
            s: Some(text.clone()),
            ..AttributeValue::default()
        },
        Value::Array(values) => AttributeValue {
            l: Some(values.iter().map(to_attribute).collect()),
            ..AttributeValue::default()
        },
        Value::Object(record) => AttributeValue {
            m: Some(to_item(record)),
            ..AttributeValue::default()
        },
    }
}

pub fn from_item(item: Item) -> Result<Record, ShrinkError> {
    item.into_iter()
        .map(|(name, attribute)| {
            let value = from_attribute(&name, attribute)?;
            Ok((name, value))
        })
        .collect()
}

fn from_attribute(name: &str, attribute: AttributeValue) -> Result<Value, ShrinkError> {
    if let Some(text) = attribute.s {
        return Ok(Value::String(text));
    }
    if let Some(number) = attribute.n {
        return parse_number(name, &number).map(Value::Number);
    }
    if let Some(flag) = attribute.bool {
        return Ok(Value::Bool(flag));
    }
    if attribute.null == Some(true) {
        return Ok(Value::Null);
    }
    if let Some(map) = attribute.m {
        return from_item(map).map(Value::Object);
    }
    if let Some(list) = attribute.l {
        return list
            .into_iter()
            .map(|element| from_attribute(name, element))
            .collect::<Result<Vec<_>, _>>()
            .map(Value::Array);
    }
    if let Some(strings) = attribute.ss {
        return Ok(Value::Array(strings.into_iter().map(Value::String).collect()));
    }
    if let Some(numbers) = attribute.ns {
        return numbers
            .iter()
            .map(|number| parse_number(name, number).map(Value::Number))
            .collect::<Result<Vec<_>, _>>()
            .map(Value::Array);
    }
    Err(ShrinkError::UnsupportedAttribute(name.to_string()))
}

fn parse_number(name: &str, number: &str) -> Result<Number, ShrinkError> {
    if let Ok(integer) = number.parse::<i64>() {
        return Ok(Number::from(integer));
    }
    number
        .parse::<f64>()
        .ok()
        .and_then(Number::from_f64)
        .ok_or_else(|| ShrinkError::UnsupportedAttribute(name.to_string()))
}
