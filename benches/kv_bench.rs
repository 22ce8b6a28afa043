use criterion::{criterion_group, criterion_main, Criterion};
use pkv::{
  db::Store,
  option::Options,
  util::rand_kv::{get_test_key, get_test_value},
};
use rand::Rng;
use std::path::PathBuf;

const BENCH_KEY_NUM: usize = 1000;

fn open_bench_store(name: &str) -> Store {
  let dir = PathBuf::from("/tmp/pkv-bench");
  if !dir.is_dir() {
    std::fs::create_dir_all(&dir).unwrap();
  }
  let mut option = Options::default();
  option.file_path = dir.join(name);
  let _ = std::fs::remove_file(&option.file_path);
  Store::open(option).unwrap()
}

fn fill_store(store: &Store) {
  for i in 0..BENCH_KEY_NUM {
    let res = store.set(&get_test_key(i), get_test_value(i));
    assert!(res.is_ok());
  }
}

fn bench_set(c: &mut Criterion) {
  let store = open_bench_store("set-bench.db");
  fill_store(&store);

  let mut rnd = rand::rng();

  c.bench_function("pkv-set-bench", |b| {
    b.iter(|| {
      let i = rnd.random_range(0..BENCH_KEY_NUM);
      let res = store.set(&get_test_key(i), get_test_value(i));
      assert!(res.is_ok());
    })
  });

  std::fs::remove_file(store.path()).unwrap();
}

fn bench_get(c: &mut Criterion) {
  let store = open_bench_store("get-bench.db");
  fill_store(&store);

  let mut rnd = rand::rng();

  c.bench_function("pkv-get-bench", |b| {
    b.iter(|| {
      let i = rnd.random_range(0..BENCH_KEY_NUM * 2);
      let res = store.get(&get_test_key(i)).unwrap();
      assert_eq!(res.is_some(), i < BENCH_KEY_NUM);
    })
  });

  std::fs::remove_file(store.path()).unwrap();
}

fn bench_erase(c: &mut Criterion) {
  let store = open_bench_store("erase-bench.db");
  fill_store(&store);

  let mut rnd = rand::rng();

  c.bench_function("pkv-erase-bench", |b| {
    b.iter(|| {
      let i = rnd.random_range(0..BENCH_KEY_NUM);
      store.erase(&get_test_key(i)).unwrap();
    })
  });

  std::fs::remove_file(store.path()).unwrap();
}

fn bench_listkeys(c: &mut Criterion) {
  let store = open_bench_store("listkeys-bench.db");
  fill_store(&store);

  c.bench_function("pkv-listkeys-bench", |b| {
    b.iter(|| {
      let res = store.list_keys();
      assert!(res.is_ok());
    })
  });

  std::fs::remove_file(store.path()).unwrap();
}

fn bench_stat(c: &mut Criterion) {
  let store = open_bench_store("stat-bench.db");
  fill_store(&store);

  c.bench_function("pkv-stat-bench", |b| {
    b.iter(|| {
      let res = store.stat();
      assert!(res.is_ok());
    })
  });

  std::fs::remove_file(store.path()).unwrap();
}

criterion_group!(
  benches,
  bench_get,
  bench_set,
  bench_erase,
  bench_listkeys,
  bench_stat
);
criterion_main!(benches);
