use tracing::{debug, error, info, warn};
use tracker_query::{CompositeQuery, FilterBuilder};
use tracker_store::{Store, StoreError};

use crate::error::RunError;
use crate::record::Record;

/// Separator between run identifiers in a bulk delete list.
pub const ID_LIST_SEPARATOR: char = ',';

/// Record field that groups records into runs.
const RUN_ID_FIELD: &str = "id";

/// Record operations over a store: batch insert, filtered search, delete by run.
pub struct Runs<S> {
    store: S,
    filters: FilterBuilder,
}

impl<S: Store> Runs<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            filters: FilterBuilder::default(),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Persist each record under a fresh key, in input order.
    ///
    /// Stops at the first store failure; records already written stay written.
    pub fn bulk_add(&self, records: &[Record]) -> Result<usize, RunError> {
        for (written, record) in records.iter().enumerate() {
            let result = self
                .store
                .allocate_key()
                .and_then(|key| self.store.put(key, record.to_document()));
            if let Err(e) = result {
                error!(written, total = records.len(), error = %e, "bulk add aborted");
                return Err(e.into());
            }
        }
        info!(count = records.len(), "bulk add complete");
        Ok(records.len())
    }

    /// Run the filter built from `params` and return every matching record.
    pub fn search<I, K, V>(&self, params: I) -> Result<Vec<Record>, RunError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let query = self.filters.build(params).inspect_err(|e| {
            warn!(name = %e.name, value = %e.value, reason = %e.reason, "rejected filter");
        })?;
        debug!(%query, "search");

        let entities = self.store.query(&query).inspect_err(log_store_error)?;
        let records = entities
            .iter()
            .map(|(_, doc)| Record::from_document(doc))
            .collect::<Result<Vec<_>, _>>()?;
        info!(count = records.len(), "search complete");
        Ok(records)
    }

    /// Delete every record whose `id` is in the comma-separated `list`.
    ///
    /// All identifiers are validated before any store call. Identifiers that
    /// match nothing are skipped. Returns the number of entities removed.
    pub fn bulk_delete(&self, list: &str) -> Result<usize, RunError> {
        let predicates = list
            .split(ID_LIST_SEPARATOR)
            .map(|raw| self.filters.equality(RUN_ID_FIELD, raw))
            .collect::<Result<Vec<_>, _>>()
            .inspect_err(|e| {
                warn!(list, value = %e.value, reason = %e.reason, "rejected run id list");
            })?;

        let mut deleted = 0;
        for predicate in predicates {
            let query = CompositeQuery::Single(predicate);
            let matched = self.store.query(&query).inspect_err(log_store_error)?;
            if matched.is_empty() {
                debug!(%query, "no records for run");
                continue;
            }
            for (key, _) in matched {
                self.store.delete(key).inspect_err(log_store_error)?;
                deleted += 1;
            }
        }
        info!(deleted, "bulk delete complete");
        Ok(deleted)
    }
}

fn log_store_error(e: &StoreError) {
    error!(error = %e, "store call failed");
}
