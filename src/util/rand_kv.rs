use rand::{distr::Alphanumeric, Rng};

use crate::value::Value;

pub fn get_test_key(i: usize) -> String {
  format!("pkv-key-{:09}", i)
}

pub fn get_test_value(i: usize) -> Value {
  let suffix: String = rand::rng()
    .sample_iter(&Alphanumeric)
    .take(16)
    .map(char::from)
    .collect();
  Value::String(format!("pkv-value-{:09}-{}", i, suffix))
}
