//! The catalog of node kinds a user can drop onto a diagram.
//!
//! There is exactly one table of kinds. Whether the flowchart shapes are
//! offered is a flag on [`Palette`], not a second table.

use std::fmt;

/// Section a [`PaletteEntry`] is listed under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Group {
    Flowchart,
    Cloud,
    Language,
    Storage,
    DevOps,
    Monitoring,
}

impl fmt::Display for Group {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Flowchart => "Flowchart",
            Self::Cloud => "Infrastructure & Cloud",
            Self::Language => "Languages & Frameworks",
            Self::Storage => "Databases & Storage",
            Self::DevOps => "DevOps & Tools",
            Self::Monitoring => "Monitoring & Logging",
        };
        f.write_str(name)
    }
}

/// A node kind: the category tag stored on nodes and its display name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaletteEntry {
    tag: &'static str,
    label: &'static str,
    group: Group,
}

impl PaletteEntry {
    const fn new(tag: &'static str, label: &'static str, group: Group) -> Self {
        Self { tag, label, group }
    }

    /// Returns the category tag, e.g. `"postgresql"`.
    pub fn tag(&self) -> &'static str {
        self.tag
    }

    /// Returns the display name, e.g. `"PostgreSQL"`.
    pub fn label(&self) -> &'static str {
        self.label
    }

    pub fn group(&self) -> Group {
        self.group
    }
}

const ENTRIES: &[PaletteEntry] = &[
    PaletteEntry::new("process", "Process", Group::Flowchart),
    PaletteEntry::new("decision", "Decision", Group::Flowchart),
    PaletteEntry::new("terminator", "Terminator", Group::Flowchart),
    PaletteEntry::new("data", "Data", Group::Flowchart),
    PaletteEntry::new("connector", "Connector", Group::Flowchart),
    PaletteEntry::new("aws", "AWS", Group::Cloud),
    PaletteEntry::new("azure", "Azure", Group::Cloud),
    PaletteEntry::new("gcp", "GCP", Group::Cloud),
    PaletteEntry::new("kubernetes", "Kubernetes", Group::Cloud),
    PaletteEntry::new("docker", "Docker", Group::Cloud),
    PaletteEntry::new("jenkins", "Jenkins", Group::Cloud),
    PaletteEntry::new("git", "Git", Group::Cloud),
    PaletteEntry::new("github", "GitHub", Group::Cloud),
    PaletteEntry::new("gitlab", "GitLab", Group::Cloud),
    PaletteEntry::new("python", "Python", Group::Language),
    PaletteEntry::new("java", "Java", Group::Language),
    PaletteEntry::new("cpp", "C++", Group::Language),
    PaletteEntry::new("javascript", "JavaScript", Group::Language),
    PaletteEntry::new("typescript", "TypeScript", Group::Language),
    PaletteEntry::new("react", "React", Group::Language),
    PaletteEntry::new("nextjs", "Next.js", Group::Language),
    PaletteEntry::new("nodejs", "Node.js", Group::Language),
    PaletteEntry::new("flask", "Flask", Group::Language),
    PaletteEntry::new("springboot", "Spring Boot", Group::Language),
    PaletteEntry::new("mongodb", "MongoDB", Group::Storage),
    PaletteEntry::new("postgresql", "PostgreSQL", Group::Storage),
    PaletteEntry::new("mysql", "MySQL", Group::Storage),
    PaletteEntry::new("redis", "Redis", Group::Storage),
    PaletteEntry::new("linux", "Linux", Group::DevOps),
    PaletteEntry::new("nginx", "Nginx", Group::DevOps),
    PaletteEntry::new("apache", "Apache", Group::DevOps),
    PaletteEntry::new("terraform", "Terraform", Group::DevOps),
    PaletteEntry::new("ansible", "Ansible", Group::DevOps),
    PaletteEntry::new("prometheus", "Prometheus", Group::Monitoring),
    PaletteEntry::new("grafana", "Grafana", Group::Monitoring),
    PaletteEntry::new("elk", "ELK Stack", Group::Monitoring),
];

/// The set of node kinds offered to the user.
///
/// # Examples
///
/// ```
/// use umlsketch_core::palette::Palette;
///
/// let full = Palette::new(true);
/// assert_eq!(full.lookup("decision").map(|e| e.label()), Some("Decision"));
///
/// let infra_only = Palette::new(false);
/// assert!(!infra_only.contains("decision"));
/// assert!(infra_only.contains("kubernetes"));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    include_flowchart: bool,
}

impl Default for Palette {
    fn default() -> Self {
        Self::new(true)
    }
}

impl Palette {
    pub fn new(include_flowchart: bool) -> Self {
        Self { include_flowchart }
    }

    pub fn includes_flowchart(&self) -> bool {
        self.include_flowchart
    }

    /// Iterates over the offered kinds in display order.
    pub fn kinds(&self) -> impl Iterator<Item = &'static PaletteEntry> + '_ {
        ENTRIES
            .iter()
            .filter(|entry| self.include_flowchart || entry.group != Group::Flowchart)
    }

    /// Finds the offered kind with the given tag.
    pub fn lookup(&self, tag: &str) -> Option<&'static PaletteEntry> {
        self.kinds().find(|entry| entry.tag == tag)
    }

    pub fn contains(&self, tag: &str) -> bool {
        self.lookup(tag).is_some()
    }
}
