use std::collections::BTreeMap;

use pkv::{db::Store, option::Options, value::Value};

fn main() {
  env_logger::init();

  let mut opts = Options::default();
  opts.file_path = std::env::temp_dir().join("pkv-basic.db");
  let store = Store::open(opts).expect("failed to open store");

  store.set("name", "Alice").expect("failed to set name");
  store.set("age", 30).expect("failed to set age");

  let mut address = BTreeMap::new();
  address.insert("city".to_string(), Value::from("Paris"));
  store
    .set("address", address)
    .expect("failed to set address");

  let name = store.get("name").expect("failed to get name");
  println!("name = {:?}", name);

  let age = store.erase("age").expect("failed to erase age");
  println!("erased age = {:?}", age);
  println!("age after erase = {:?}", store.get("age").unwrap());

  let stat = store.stat().expect("failed to stat store");
  println!("{} keys, {} bytes on disk", stat.key_num, stat.file_size);
}
