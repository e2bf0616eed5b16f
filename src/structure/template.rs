//! Label interpolation for ISA structure templates.
//!
//! Templates are plain YAML text. Before parsing, `${INVESTIGATION_LABEL}`,
//! `${STUDY_LABEL}` and `${ASSAY_LABEL}` are replaced with the labels, and
//! the bare `*_LABEL_SLUG` markers with the connected identifiers
//! `i_<inv>`, `s_<inv><study>` and `a_<inv><study><assay>`.

pub const DEFAULT_INVESTIGATION_LABEL: &str = "My Investigation";
pub const DEFAULT_STUDY_LABEL: &str = "My Study";
pub const DEFAULT_ASSAY_LABEL: &str = "My Assay";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateLabels {
    pub investigation: String,
    pub study: String,
    pub assay: String,
}

impl Default for TemplateLabels {
    fn default() -> Self {
        Self {
            investigation: DEFAULT_INVESTIGATION_LABEL.into(),
            study: DEFAULT_STUDY_LABEL.into(),
            assay: DEFAULT_ASSAY_LABEL.into(),
        }
    }
}

impl TemplateLabels {
    pub fn investigation_id(&self) -> String {
        format!("i_{}", self.investigation)
    }

    pub fn study_id(&self) -> String {
        format!("s_{}{}", self.investigation, self.study)
    }

    pub fn assay_id(&self) -> String {
        format!("a_{}{}{}", self.investigation, self.study, self.assay)
    }
}

pub fn interpolate(template: &str, labels: &TemplateLabels) -> String {
    template
        .replace("${INVESTIGATION_LABEL}", &labels.investigation)
        .replace("${STUDY_LABEL}", &labels.study)
        .replace("${ASSAY_LABEL}", &labels.assay)
        .replace("INVESTIGATION_LABEL_SLUG", &labels.investigation_id())
        .replace("STUDY_LABEL_SLUG", &labels.study_id())
        .replace("ASSAY_LABEL_SLUG", &labels.assay_id())
}
