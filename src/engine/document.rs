//! Evidence document records as delivered by the document store.

use std::collections::BTreeSet;

use serde::Deserialize;

/// One evidence document with its category tags.
///
/// The four tag lists arrive as free-form strings and may repeat a value,
/// both within one list and across lists; [`Document::tag_set`] collapses
/// them before any comparison.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
	/// Stable identifier from the document store.
	pub id: String,
	/// Display title, also forwarded verbatim as a search query on click.
	pub title: String,
	/// Subject-matter tags (e.g. "housing", "school discipline").
	#[serde(default)]
	pub subjects: Vec<String>,
	/// Risk-factor tags.
	#[serde(default)]
	pub risk_factors: Vec<String>,
	/// Studied-population tags.
	#[serde(default)]
	pub populations: Vec<String>,
	/// Intervention tags.
	#[serde(default)]
	pub interventions: Vec<String>,
}

impl Document {
	/// The flat, deduplicated tag set for this document: the union of all
	/// four category lists.
	pub fn tag_set(&self) -> BTreeSet<String> {
		self.subjects
			.iter()
			.chain(&self.risk_factors)
			.chain(&self.populations)
			.chain(&self.interventions)
			.cloned()
			.collect()
	}
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;

	use super::*;

	fn doc(id: &str, subjects: &[&str], risks: &[&str]) -> Document {
		Document {
			id: id.into(),
			title: id.to_uppercase(),
			subjects: subjects.iter().map(|s| s.to_string()).collect(),
			risk_factors: risks.iter().map(|s| s.to_string()).collect(),
			..Document::default()
		}
	}

	#[test]
	fn tag_set_unions_all_category_lists() {
		let d = Document {
			id: "d1".into(),
			title: "Doc 1".into(),
			subjects: vec!["poverty".into()],
			risk_factors: vec!["suspension".into()],
			populations: vec!["adolescents".into()],
			interventions: vec!["mentoring".into()],
		};
		let tags: Vec<_> = d.tag_set().into_iter().collect();
		assert_eq!(tags, ["adolescents", "mentoring", "poverty", "suspension"]);
	}

	#[test]
	fn duplicates_within_and_across_lists_collapse() {
		let d = doc("d1", &["poverty", "poverty"], &["poverty", "suspension"]);
		assert_eq!(d.tag_set().len(), 2);
	}

	#[test]
	fn empty_lists_yield_empty_tag_set() {
		let d = doc("d1", &[], &[]);
		assert!(d.tag_set().is_empty());
	}

	#[test]
	fn deserializes_camel_case_with_missing_lists() {
		let d: Document = serde_json::from_str(
			r#"{"id":"a","title":"A","riskFactors":["suspension"]}"#,
		)
		.unwrap();
		assert_eq!(d.risk_factors, ["suspension"]);
		assert!(d.subjects.is_empty());
	}
}
