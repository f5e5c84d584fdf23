use bson::{Bson, Document, doc};
use serde::{Deserialize, Serialize};

/// Payload of a `$lookup` stage.
#[derive(Debug, Clone, PartialEq)]
pub struct LookupStage {
    pub from: String,
    pub local_field: Option<Bson>,
    pub foreign_field: Option<Bson>,
    pub as_field: String,
}

impl LookupStage {
    #[must_use]
    pub fn to_document(&self) -> Document {
        let mut d = doc! { "from": self.from.as_str() };
        if let Some(v) = &self.local_field {
            d.insert("localField", v.clone());
        }
        if let Some(v) = &self.foreign_field {
            d.insert("foreignField", v.clone());
        }
        d.insert("as", self.as_field.as_str());
        d
    }
}

/// One aggregation pipeline stage.
#[derive(Debug, Clone, PartialEq)]
pub enum Stage {
    Lookup(LookupStage),
    Match(Document),
    Project(Document),
    Skip(i64),
    Limit(i64),
    Sort(Document),
}

impl Stage {
    #[must_use]
    pub const fn kind(&self) -> StageKind {
        match self {
            Self::Lookup(_) => StageKind::Lookup,
            Self::Match(_) => StageKind::Match,
            Self::Project(_) => StageKind::Project,
            Self::Skip(_) => StageKind::Skip,
            Self::Limit(_) => StageKind::Limit,
            Self::Sort(_) => StageKind::Sort,
        }
    }

    /// The store-native single-key document, e.g. `{ "$limit": 5 }`.
    #[must_use]
    pub fn to_document(&self) -> Document {
        let payload = match self {
            Self::Lookup(l) => Bson::Document(l.to_document()),
            Self::Match(d) | Self::Project(d) | Self::Sort(d) => Bson::Document(d.clone()),
            Self::Skip(n) | Self::Limit(n) => i32::try_from(*n).map_or(Bson::Int64(*n), Bson::Int32),
        };
        let mut out = Document::new();
        out.insert(self.kind().symbol(), payload);
        out
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StageKind {
    Lookup,
    Match,
    Project,
    Skip,
    Limit,
    Sort,
}

impl StageKind {
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Lookup => "$lookup",
            Self::Match => "$match",
            Self::Project => "$project",
            Self::Skip => "$skip",
            Self::Limit => "$limit",
            Self::Sort => "$sort",
        }
    }
}

/// An ordered aggregation pipeline.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Pipeline {
    pub stages: Vec<Stage>,
}

impl Pipeline {
    #[must_use]
    pub fn len(&self) -> usize {
        self.stages.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    #[must_use]
    pub fn to_documents(&self) -> Vec<Document> {
        self.stages.iter().map(Stage::to_document).collect()
    }

    /// Relaxed extended JSON; identifiers render as `{"$oid": "..."}`.
    #[must_use]
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::Value::Array(
            self.stages
                .iter()
                .map(|s| Bson::Document(s.to_document()).into_relaxed_extjson())
                .collect(),
        )
    }
}

impl IntoIterator for Pipeline {
    type Item = Stage;
    type IntoIter = std::vec::IntoIter<Stage>;
    fn into_iter(self) -> Self::IntoIter {
        self.stages.into_iter()
    }
}

/// Caller-facing failure shape: `{ "msg": "..." }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorMessage {
    pub msg: String,
}
