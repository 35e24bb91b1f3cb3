use lasso::{Spur, ThreadedRodeo};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, LazyLock};

/// Interner shared by every document in the process.
static INTERNER: LazyLock<ThreadedRodeo> = LazyLock::new(ThreadedRodeo::default);

/// An element's `id` attribute, interned so the document's id index can key
/// on a `Copy` value.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct ElementId(Spur);

impl ElementId {
    /// Intern a new string as an ElementId, or return existing if already interned.
    pub fn intern(s: &str) -> Self {
        ElementId(INTERNER.get_or_intern(s))
    }

    /// Return the id for `s` only if it was interned before.
    ///
    /// Lookups go through here so that probing for missing elements does not
    /// grow the interner.
    pub fn lookup(s: &str) -> Option<Self> {
        INTERNER.get(s).map(ElementId)
    }

    /// Resolve back to a string slice.
    pub fn as_str(&self) -> &str {
        INTERNER.resolve(&self.0)
    }
}

impl fmt::Debug for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.as_str())
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for ElementId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ElementId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(ElementId::intern(&s))
    }
}

// ─── Sequences ───────────────────────────────────────────────────────────

static GROUP_IDS: LazyLock<IdSequence> = LazyLock::new(IdSequence::new);
static DOM_IDS: LazyLock<IdSequence> = LazyLock::new(IdSequence::new);

/// A shared, monotonically increasing counter used to mint unique ids.
///
/// Clones share the same counter, so one sequence can be injected into
/// several surfaces and forms. Ids handed out by one sequence never repeat.
#[derive(Debug, Clone, Default)]
pub struct IdSequence(Arc<AtomicU64>);

impl IdSequence {
    /// A fresh sequence starting at 0.
    #[must_use]
    pub fn new() -> Self {
        Self::starting_at(0)
    }

    #[must_use]
    pub fn starting_at(first: u64) -> Self {
        Self(Arc::new(AtomicU64::new(first)))
    }

    /// Process-wide sequence for form group prefixes (`pts_svg_{n}`).
    #[must_use]
    pub fn global_groups() -> Self {
        GROUP_IDS.clone()
    }

    /// Process-wide sequence for fallback element ids (`p-{n}`).
    #[must_use]
    pub fn global_dom() -> Self {
        DOM_IDS.clone()
    }

    /// Take the next value.
    pub fn next_id(&self) -> u64 {
        self.0.fetch_add(1, Ordering::Relaxed)
    }

    /// The value the next call to [`next_id`](Self::next_id) will return.
    pub fn peek(&self) -> u64 {
        self.0.load(Ordering::Relaxed)
    }
}
