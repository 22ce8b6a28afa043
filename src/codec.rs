use log::error;

use crate::{
  errors::{Errors, Result},
  value::{Records, Value},
};

/// Decodes the raw content of a data file.
///
/// An empty file and a file holding only the YAML null marker both decode
/// to an empty mapping. Scalar keys at any depth decode to strings.
pub(crate) fn decode_records(buf: &[u8]) -> Result<Records> {
  if buf.iter().all(u8::is_ascii_whitespace) {
    return Ok(Records::new());
  }

  match serde_yaml::from_slice::<Value>(buf) {
    Ok(Value::Null) => Ok(Records::new()),
    Ok(Value::Mapping(records)) => Ok(records),
    Ok(_) => {
      error!("failed to decode data file: top-level value is not a mapping");
      Err(Errors::DataFileCorrupted(
        "top-level value is not a mapping".to_string(),
      ))
    }
    Err(e) => {
      error!("failed to decode data file: {}", e);
      Err(Errors::DataFileCorrupted(e.to_string()))
    }
  }
}

pub(crate) fn encode_records(records: &Records) -> Result<Vec<u8>> {
  match serde_yaml::to_string(records) {
    Ok(s) => Ok(s.into_bytes()),
    Err(e) => {
      error!("failed to encode records: {}", e);
      Err(Errors::FailedToEncodeRecords)
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_decode_empty() {
    assert!(decode_records(b"").unwrap().is_empty());
    assert!(decode_records(b"  \n\t\n").unwrap().is_empty());
    assert!(decode_records(b"null\n").unwrap().is_empty());
    assert!(decode_records(b"~").unwrap().is_empty());
  }

  #[test]
  fn test_decode_mapping() {
    let records = decode_records(b"age: 30\nname: Alice\ntags:\n- a\n- b\n").unwrap();
    assert_eq!(records.len(), 3);
    assert_eq!(records.get("age"), Some(&Value::Int(30)));
    assert_eq!(records.get("name"), Some(&Value::from("Alice")));
    assert_eq!(
      records.get("tags"),
      Some(&Value::Sequence(vec![Value::from("a"), Value::from("b")]))
    );
  }

  #[test]
  fn test_decode_scalar_keys() {
    let records = decode_records(b"k:\n  1: a\n  true: b\n").unwrap();
    let nested = records.get("k").unwrap().as_mapping().unwrap();
    assert_eq!(nested.get("1"), Some(&Value::from("a")));
    assert_eq!(nested.get("true"), Some(&Value::from("b")));

    // top-level keys follow the same rule
    let records = decode_records(b"1: a\nname: x\nnested: {true: 1}\n").unwrap();
    assert_eq!(records.get("1"), Some(&Value::from("a")));
    assert_eq!(records.get("name"), Some(&Value::from("x")));

    // and survive a rewrite
    let buf = encode_records(&records).unwrap();
    assert_eq!(decode_records(&buf).unwrap(), records);
  }

  #[test]
  fn test_decode_corrupted() {
    let res1 = decode_records(b"- just\n- a list\n");
    assert!(matches!(res1, Err(Errors::DataFileCorrupted(_))));

    let res2 = decode_records(b"key: [unclosed\n");
    assert!(matches!(res2, Err(Errors::DataFileCorrupted(_))));

    let res3 = decode_records(b"plain scalar");
    assert_eq!(
      res3.err().unwrap(),
      Errors::DataFileCorrupted("top-level value is not a mapping".to_string())
    );
  }

  #[test]
  fn test_encode_records() {
    let mut records = Records::new();
    records.insert("name".to_string(), Value::from("Alice"));
    records.insert("age".to_string(), Value::from(30));

    let buf = encode_records(&records).unwrap();
    assert_eq!(String::from_utf8(buf.clone()).unwrap(), "age: 30\nname: Alice\n");
    assert_eq!(decode_records(&buf).unwrap(), records);

    let empty = encode_records(&Records::new()).unwrap();
    assert!(decode_records(&empty).unwrap().is_empty());
  }
}
