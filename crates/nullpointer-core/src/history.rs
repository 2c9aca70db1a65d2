use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The records of a single service: response URL to original item.
pub type Partition = BTreeMap<String, String>;

/// A single completed submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryRecord {
    /// The service the item was submitted to.
    pub service_url: String,
    /// What the service answered with (hosted file or shortened link).
    pub response: String,
    /// The submitted file path or source URL.
    pub item: String,
}

impl HistoryRecord {
    pub fn new(
        service_url: impl Into<String>,
        response: impl Into<String>,
        item: impl Into<String>,
    ) -> Self {
        Self {
            service_url: service_url.into(),
            response: response.into(),
            item: item.into(),
        }
    }
}

/// How a record is located inside the history.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lookup<'a> {
    /// Match on the response URL the service returned.
    Response(&'a str),
    /// Match on the originally submitted item.
    Item(&'a str),
}

impl<'a> Lookup<'a> {
    /// Builds a lookup from an optional pair of criteria.
    ///
    /// A non-empty `response` always takes precedence and `item` is ignored.
    pub fn new(item: &'a str, response: &'a str) -> Self {
        if response.is_empty() {
            Self::Item(item)
        } else {
            Self::Response(response)
        }
    }
}

/// Submission history, partitioned by service URL.
///
/// Serializes as a JSON object of objects:
///
/// ```json
/// {
///   "http://0x0.st": {
///     "http://0x0.st/abc.png": "/home/user/abc.png"
///   }
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct History {
    partitions: BTreeMap<String, Partition>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` when there are no partitions at all.
    ///
    /// A history holding only empty partitions is not empty.
    pub fn is_empty(&self) -> bool {
        self.partitions.is_empty()
    }

    /// Total number of records across all partitions.
    pub fn len(&self) -> usize {
        self.partitions.values().map(BTreeMap::len).sum()
    }

    pub fn partition(&self, service_url: &str) -> Option<&Partition> {
        self.partitions.get(service_url)
    }

    pub fn partitions(&self) -> impl Iterator<Item = (&str, &Partition)> {
        self.partitions
            .iter()
            .map(|(service_url, partition)| (service_url.as_str(), partition))
    }

    /// Iterates over every record in partition order.
    pub fn records(&self) -> impl Iterator<Item = HistoryRecord> + '_ {
        self.partitions.iter().flat_map(|(service_url, partition)| {
            partition
                .iter()
                .map(move |(response, item)| HistoryRecord::new(service_url, response, item))
        })
    }

    /// Records `item` under `response` for `service_url`, replacing any
    /// record already stored at that response.
    pub fn append(&mut self, item: &str, service_url: &str, response: &str) {
        self.partitions
            .entry(service_url.to_owned())
            .or_default()
            .insert(response.to_owned(), item.to_owned());
    }

    /// Finds a record within the `service_url` partition without removing it.
    pub fn find(&self, service_url: &str, lookup: Lookup<'_>) -> Option<HistoryRecord> {
        let partition = self.partitions.get(service_url)?;

        match lookup {
            Lookup::Response(response) => partition
                .get(response)
                .map(|item| HistoryRecord::new(service_url, response, item)),
            Lookup::Item(item) => partition
                .iter()
                .find(|(_, value)| value.as_str() == item)
                .map(|(response, value)| HistoryRecord::new(service_url, response, value)),
        }
    }

    /// Removes a record and returns it.
    ///
    /// A response lookup only searches the `service_url` partition. An item
    /// lookup searches every partition and removes the first match from the
    /// partition it was found in, which need not be `service_url`.
    pub fn pop(&mut self, service_url: &str, lookup: Lookup<'_>) -> Option<HistoryRecord> {
        match lookup {
            Lookup::Response(response) => {
                let item = self.partitions.get_mut(service_url)?.remove(response)?;
                Some(HistoryRecord::new(service_url, response, item))
            }
            Lookup::Item(item) => {
                let (found_in, response) =
                    self.partitions.iter().find_map(|(partition_url, partition)| {
                        partition
                            .iter()
                            .find(|(_, value)| value.as_str() == item)
                            .map(|(response, _)| (partition_url.clone(), response.clone()))
                    })?;

                let item = self.partitions.get_mut(&found_in)?.remove(&response)?;
                Some(HistoryRecord {
                    service_url: found_in,
                    response,
                    item,
                })
            }
        }
    }

    /// Clears one partition, keeping its key, or everything when
    /// `service_url` is `None`. Clearing an unknown partition does nothing.
    pub fn clear(&mut self, service_url: Option<&str>) {
        match service_url {
            Some(service_url) => {
                if let Some(partition) = self.partitions.get_mut(service_url) {
                    partition.clear();
                }
            }
            None => self.partitions.clear(),
        }
    }
}

impl FromIterator<HistoryRecord> for History {
    fn from_iter<T: IntoIterator<Item = HistoryRecord>>(iter: T) -> Self {
        let mut history = History::new();
        for record in iter {
            history.append(&record.item, &record.service_url, &record.response);
        }
        history
    }
}
