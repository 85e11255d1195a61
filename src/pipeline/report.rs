//! Reporting collaborator interface.
//!
//! The pipeline hands already-computed label distributions, frequency
//! tables and confusion matrices to a [`Reporter`] and moves on; renderers
//! return nothing. The built-in [`ConsoleReporter`] draws ASCII tables; a
//! plotting front end can implement the same trait.

use std::collections::HashMap;

use ndarray::Array2;

use crate::pipeline::data::Label;

/// Fire-and-forget rendering of evaluation artifacts.
pub trait Reporter {
    fn label_distribution(&self, counts: &[(Label, usize)]);
    fn frequency_table(&self, label: Label, top: &[(String, usize)]);
    fn confusion(&self, matrix: &Array2<usize>);
}

/// Renders reports as plain tables on stdout.
pub struct ConsoleReporter;

impl Reporter for ConsoleReporter {
    fn label_distribution(&self, counts: &[(Label, usize)]) {
        let max = counts.iter().map(|(_, c)| *c).max().unwrap_or(0).max(1);
        println!("Label distribution:");
        for (label, count) in counts {
            let bar = "#".repeat(count * 40 / max);
            println!("  {:<18} {:>6}  {}", label.as_str(), count, bar);
        }
        println!();
    }

    fn frequency_table(&self, label: Label, top: &[(String, usize)]) {
        println!("Most frequent terms, {} articles:", label.as_str());
        for (term, count) in top {
            println!("  {:<24} {:>6}", term, count);
        }
        println!();
    }

    fn confusion(&self, matrix: &Array2<usize>) {
        let names: Vec<&str> = Label::REPORT_ORDER.iter().map(|l| l.as_str()).collect();
        print!("{:<18}", "actual \\ predicted");
        for name in &names {
            print!(" {:>10}", short(name));
        }
        println!();
        for (i, name) in names.iter().enumerate() {
            print!("{:<18}", short(name));
            for j in 0..names.len() {
                print!(" {:>10}", matrix[[i, j]]);
            }
            println!();
        }
        println!();
    }
}

fn short(name: &str) -> &str {
    // "PARTIALLY FALSE" overflows its column.
    if name.len() > 10 { "PARTIALLY" } else { name }
}

/// Top-N whitespace tokens by frequency across the given texts.
pub fn top_terms<'a, I>(texts: I, n: usize) -> Vec<(String, usize)>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut freq: HashMap<&str, usize> = HashMap::new();
    for text in texts {
        for token in text.split_whitespace() {
            *freq.entry(token).or_insert(0) += 1;
        }
    }
    let mut ranked: Vec<(String, usize)> = freq
        .into_iter()
        .map(|(t, c)| (t.to_string(), c))
        .collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
    ranked.truncate(n);
    ranked
}
