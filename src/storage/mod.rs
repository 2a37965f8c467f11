use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
};

type CacheStorage<K, V> = Arc<Mutex<HashMap<K, V>>>;

pub mod memo;
