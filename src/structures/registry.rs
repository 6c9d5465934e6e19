//! Process-wide owner of runtime-modulus lookup tables.

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::sync::{Arc, OnceLock, PoisonError, RwLock};

use crate::error::ModulusError;
use crate::structures::lut::{FullTables, LogTable};
use crate::structures::pow::PowElem;
use crate::structures::state::FieldState;
use crate::structures::table::TableElem;
use crate::word::Word;

/// Word type and modulus of a field.
type Key = (TypeId, u64);
type Slot = Arc<dyn Any + Send + Sync>;

/// Cache of lookup tables keyed by field.
///
/// Each table is built once per word type and modulus, then handed out as an
/// `Arc`. Elements hold the `Arc`, so a table stays alive as long as any
/// element of its field does, even after [`clear`](Self::clear).
///
/// Tables are built outside the lock; two threads racing on the same new
/// field may both build it, and the first one stored wins.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use gf2n::{BinaryField, TableRegistry};
///
/// let registry = TableRegistry::new();
/// let a = registry.pow_elem(3u8, 0b1011).unwrap();
/// let b = registry.pow_elem(5u8, 0b1011).unwrap();
///
/// assert!(Arc::ptr_eq(a.lut(), b.lut()));
/// assert_eq!((&a * &b).value(), 4);
/// ```
#[derive(Default)]
pub struct TableRegistry {
    logs: RwLock<HashMap<Key, Slot>>,
    full: RwLock<HashMap<Key, Slot>>,
}

impl TableRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// The shared registry of the process.
    pub fn global() -> &'static TableRegistry {
        static GLOBAL: OnceLock<TableRegistry> = OnceLock::new();
        GLOBAL.get_or_init(TableRegistry::new)
    }

    /// Log tables of the field defined by `modulus`, built on first request.
    ///
    /// # Errors
    ///
    /// Fails if the modulus is degenerate or not primitive, or if its degree
    /// exceeds [`MAX_LOG_TABLE_DEGREE`](crate::MAX_LOG_TABLE_DEGREE).
    pub fn log_table<T: Word>(&self, modulus: T) -> Result<Arc<LogTable<T>>, ModulusError> {
        get_or_build(&self.logs, modulus, "log", LogTable::new)
    }

    /// Multiplication and division tables of the field defined by `modulus`,
    /// built on first request.
    ///
    /// # Errors
    ///
    /// Fails if the modulus is degenerate or its degree exceeds
    /// [`MAX_FULL_TABLE_DEGREE`](crate::MAX_FULL_TABLE_DEGREE).
    pub fn full_tables<T: Word>(&self, modulus: T) -> Result<Arc<FullTables<T>>, ModulusError> {
        get_or_build(&self.full, modulus, "full", FullTables::new)
    }

    /// Create a log-table element, fetching or building the tables.
    pub fn pow_elem<T: Word>(&self, value: T, modulus: T) -> Result<PowElem<T>, ModulusError> {
        Ok(PowElem::new(value, self.log_table(modulus)?))
    }

    /// Create a full-table element, fetching or building the tables.
    pub fn table_elem<T: Word>(&self, value: T, modulus: T) -> Result<TableElem<T>, ModulusError> {
        Ok(TableElem::new(value, self.full_tables(modulus)?))
    }

    /// Number of cached tables of either kind.
    pub fn len(&self) -> usize {
        read_len(&self.logs) + read_len(&self.full)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop every cached table.
    ///
    /// Elements created earlier keep their own handles and stay valid.
    pub fn clear(&self) {
        self.logs
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
        self.full
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}

impl std::fmt::Debug for TableRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TableRegistry")
            .field("log_tables", &read_len(&self.logs))
            .field("full_tables", &read_len(&self.full))
            .finish()
    }
}

fn read_len(map: &RwLock<HashMap<Key, Slot>>) -> usize {
    map.read().unwrap_or_else(PoisonError::into_inner).len()
}

fn get_or_build<T, V, F>(
    map: &RwLock<HashMap<Key, Slot>>,
    modulus: T,
    kind: &'static str,
    build: F,
) -> Result<Arc<V>, ModulusError>
where
    T: Word,
    V: Any + Send + Sync,
    F: FnOnce(FieldState<T>) -> Result<V, ModulusError>,
{
    let state = FieldState::new(modulus)?;
    let key = (TypeId::of::<T>(), modulus.to_u64());

    let cached = map
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .get(&key)
        .cloned();
    if let Some(table) = cached.and_then(|slot| slot.downcast::<V>().ok()) {
        tracing::trace!(modulus = key.1, kind, "table cache hit");
        return Ok(table);
    }

    tracing::trace!(modulus = key.1, kind, "table cache miss");
    let built = Arc::new(build(state)?);
    let mut map = map.write().unwrap_or_else(PoisonError::into_inner);
    let slot = map
        .entry(key)
        .or_insert_with(|| Arc::clone(&built) as Slot);
    Ok(Arc::clone(slot).downcast::<V>().unwrap_or(built))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algebra::field::BinaryField;

    #[test]
    fn tables_are_shared_per_field() {
        let registry = TableRegistry::new();
        assert!(registry.is_empty());

        let a = registry.log_table(0b1011u8).unwrap();
        let b = registry.log_table(0b1011u8).unwrap();
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(registry.len(), 1);

        let c = registry.log_table(0b1101u8).unwrap();
        assert!(!Arc::ptr_eq(&a, &c));
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn word_type_is_part_of_the_key() {
        let registry = TableRegistry::new();
        let narrow = registry.full_tables(0b1011u8).unwrap();
        let wide = registry.full_tables(0b1011u16).unwrap();
        assert_eq!(narrow.mul(7, 4), 1);
        assert_eq!(wide.mul(7, 4), 1);
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn failures_are_not_cached() {
        let registry = TableRegistry::new();
        assert_eq!(
            registry.log_table(1u8).unwrap_err(),
            ModulusError::Degenerate(1)
        );
        assert!(matches!(
            registry.log_table(0b11111u8),
            Err(ModulusError::NotPrimitive { .. })
        ));
        assert_eq!(
            registry.table_elem(3u8, 0b101).unwrap_err(),
            ModulusError::NotIrreducible(0b101)
        );
        assert!(matches!(
            registry.full_tables(0b1_0001_0000_0000_1011u32),
            Err(ModulusError::TableTooLarge {
                degree: 16,
                max: 12,
            })
        ));
        assert!(registry.is_empty());
    }

    #[test]
    fn elements_outlive_clear() {
        let registry = TableRegistry::new();
        let a = registry.table_elem(3u8, 0b1011).unwrap();
        let b = registry.table_elem(5u8, 0b1011).unwrap();
        registry.clear();
        assert!(registry.is_empty());
        assert_eq!((&a * &b).value(), 4);

        let p = registry.pow_elem(6u8, 0b1011).unwrap();
        assert_eq!(p.pow(7).value(), 1);
    }

    #[test]
    fn global_is_a_singleton() {
        let a = TableRegistry::global() as *const TableRegistry;
        let b = TableRegistry::global() as *const TableRegistry;
        assert_eq!(a, b);
        assert!(TableRegistry::global().log_table(0b100011101u16).is_ok());
    }

    #[test]
    fn concurrent_readers_share_one_table() {
        let registry = Arc::new(TableRegistry::new());
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let registry = Arc::clone(&registry);
                std::thread::spawn(move || registry.log_table(0b100011101u16).unwrap())
            })
            .collect();
        let tables: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        let first = registry.log_table(0b100011101u16).unwrap();
        for t in &tables {
            assert_eq!(t.ind_to_pol(), first.ind_to_pol());
        }
        assert_eq!(registry.len(), 1);
    }
}
