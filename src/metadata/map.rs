//! Mapa ordenado de metadata con valores ya listos para mostrar.

use indexmap::IndexMap;
use indexmap::map::Iter;
use serde::{Deserialize, Serialize};

/// Clave reservada para el mapa centinela de extracción fallida.
pub const ERROR_KEY: &str = "Error";

/// Metadata extraída de un archivo: nombre canónico → valor en texto.
///
/// Conserva el orden de inserción. Las fuentes primarias escriben con
/// [`MetadataMap::insert`]; las fuentes de respaldo con
/// [`MetadataMap::insert_if_absent`], que nunca pisa un valor existente.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MetadataMap {
    entries: IndexMap<String, String>,
}

impl MetadataMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mapa centinela con una sola clave `Error`.
    pub fn failure(message: impl Into<String>) -> Self {
        let mut map = Self::new();
        map.insert(ERROR_KEY, message);
        map
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.insert(key.into(), value.into());
    }

    /// Inserta solo si la clave no existe. Devuelve `true` si escribió.
    pub fn insert_if_absent(&mut self, key: impl Into<String>, value: impl Into<String>) -> bool {
        let key = key.into();
        if self.entries.contains_key(&key) {
            return false;
        }
        self.entries.insert(key, value.into());
        true
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn iter(&self) -> Iter<'_, String, String> {
        self.entries.iter()
    }

    /// `true` si el mapa es el centinela de extracción fallida.
    pub fn is_failure(&self) -> bool {
        self.entries.len() == 1 && self.entries.contains_key(ERROR_KEY)
    }

    /// Mensaje del centinela, si lo es.
    pub fn failure_message(&self) -> Option<&str> {
        if self.is_failure() {
            self.get(ERROR_KEY)
        } else {
            None
        }
    }
}

impl<'a> IntoIterator for &'a MetadataMap {
    type Item = (&'a String, &'a String);
    type IntoIter = Iter<'a, String, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for MetadataMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (key, value) in iter {
            map.insert(key, value);
        }
        map
    }
}
