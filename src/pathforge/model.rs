use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use uuid::Uuid;

/// A single unit of training content.
///
/// `source` is append-only provenance: merging new content into a module
/// unions the originating filenames, it never drops them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Module {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub content: String,
    #[serde(default)]
    pub source: BTreeSet<String>,
    #[serde(default)]
    pub key_points: Vec<String>,
    #[serde(default)]
    pub content_types: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Module {
    pub fn new(title: String, description: String, content: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            title,
            description,
            content,
            source: BTreeSet::new(),
            key_points: Vec::new(),
            content_types: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn with_source(mut self, filename: impl Into<String>) -> Self {
        self.source.insert(filename.into());
        self
    }

    pub fn with_key_points(mut self, key_points: Vec<String>) -> Self {
        self.key_points = key_points;
        self
    }
}

/// A named grouping of modules within a pathway. Titles are the only
/// section identifier; uniqueness is not enforced.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Section {
    pub title: String,
    #[serde(default)]
    pub modules: Vec<Module>,
}

impl Section {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            modules: Vec::new(),
        }
    }
}

/// A top-level training program: ordered sections of ordered modules.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pathway {
    pub name: String,
    #[serde(default)]
    pub sections: Vec<Section>,
}

impl Pathway {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            sections: Vec::new(),
        }
    }

    pub fn module_count(&self) -> usize {
        self.sections.iter().map(|s| s.modules.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }
}

/// The addressable set of pathways in a session.
///
/// Pathway ordinal 1 is always `current`; ordinal N >= 2 addresses
/// `past[N-2]`, the (N-1)-th most recent generation run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathwaySet {
    pub current: Pathway,
    #[serde(default)]
    pub past: Vec<Pathway>,
}

impl Default for PathwaySet {
    fn default() -> Self {
        Self {
            current: Pathway::new("Training Pathway"),
            past: Vec::new(),
        }
    }
}

impl PathwaySet {
    /// Total number of addressable pathways (current plus history).
    pub fn count(&self) -> usize {
        1 + self.past.len()
    }

    /// Human-readable label for a 1-based pathway ordinal.
    pub fn label(&self, pathway_num: usize) -> String {
        if pathway_num == 1 {
            "Current Pathway".to_string()
        } else {
            format!("Past Pathway {}", pathway_num - 1)
        }
    }

    pub fn get(&self, pathway_num: usize) -> Option<&Pathway> {
        match pathway_num {
            0 => None,
            1 => Some(&self.current),
            n => self.past.get(n - 2),
        }
    }

    pub fn get_mut(&mut self, pathway_num: usize) -> Option<&mut Pathway> {
        match pathway_num {
            0 => None,
            1 => Some(&mut self.current),
            n => self.past.get_mut(n - 2),
        }
    }
}

/// Free-form generation metadata. Used only for template filling in the
/// chunker, never for control flow.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainingContext {
    pub training_type: String,
    pub target_audience: String,
    pub industry: String,
    #[serde(default)]
    pub primary_goals: String,
}

impl Default for TrainingContext {
    fn default() -> Self {
        Self {
            training_type: "Process Training".to_string(),
            target_audience: "employees".to_string(),
            industry: "general industry".to_string(),
            primary_goals: String::new(),
        }
    }
}

/// The whole mutable state owned by one session: the pathway hierarchy,
/// the generation context, and chunker output waiting for an instruction
/// that places it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Session {
    pub pathways: PathwaySet,
    pub context: TrainingContext,
    #[serde(default)]
    pub pending: Vec<Module>,
}
