//! Where the table of contents comes from.
//!
//! The bundled report ships with a fixed outline whose ids match the `{#id}` anchors in its
//! markdown. Any other document gets an outline derived from its own headings.

use crate::error::Result;
use crate::input::HeadingRef;
use crate::section::{Outline, Section};

/// The bundled report, *Comparative Study of SLAM Algorithms for Drone Navigation*.
pub const REPORT_SOURCE: &str = include_str!("../assets/report.md");

fn group(id: &str, title: &str, children: &[(&str, &str)]) -> Section {
    Section::with_children(
        id,
        title,
        children
            .iter()
            .map(|(id, title)| Section::new(*id, *title))
            .collect(),
    )
}

/// Table of contents of the bundled report.
///
/// # Errors
///
/// Never fails in practice; the ids are fixed and unique.
pub fn report_outline() -> Result<Outline> {
    Outline::new(vec![
        Section::new("abstract", "1. Abstract"),
        group(
            "introduction",
            "2. Introduction",
            &[
                ("introduction-1", "2.1 Background"),
                ("introduction-2", "2.2 SLAM"),
                (
                    "introduction-3",
                    "2.3 Autonomous Drones and their Challenges",
                ),
                ("introduction-4", "2.4 Significance"),
            ],
        ),
        group(
            "literature",
            "3. Literature Review / Related Work",
            &[
                ("literature-1", "3.1 Evolution of SLAM"),
                ("literature-2", "3.2 Recent Advances"),
                ("literature-3", "3.3 SLAM for Aerial Robotics"),
                ("literature-4", "3.4 Dataset and Simulations"),
            ],
        ),
        group(
            "slam",
            "4. SLAM Algorithms and KITTI Dataset",
            &[
                ("slam-1", "4.1 ORB SLAM"),
                ("slam-2", "4.2 Graph-Based Optimized SLAM"),
                ("slam-3", "4.3 DROID SLAM"),
                ("slam-4", "4.4 LSD SLAM"),
                ("slam-5", "4.5 KITTI Dataset"),
            ],
        ),
        group(
            "methodology",
            "5. Methodology & Implementation",
            &[
                ("methodology-1", "5.1 SLAM"),
                ("methodology-2", "5.2 Dataset Benchmarking"),
                ("methodology-3", "5.3 WEBOTS Simulation"),
                ("methodology-4", "5.4 Analysis Techniques"),
            ],
        ),
        group(
            "results",
            "6. Results and Discussion",
            &[
                ("results-1", "6.1 ORB SLAM"),
                ("results-2", "6.2 Graph based Optimized SLAM"),
                ("results-3", "6.3 DROID SLAM"),
                ("results-4", "6.4 LSD SLAM"),
            ],
        ),
        Section::new("demo", "7. Demo of Simulation"),
        Section::new("conclusion", "8. Conclusion and Future Work"),
        Section::new("references", "9. References"),
    ])
}

/// Build an outline from document headings.
///
/// Each heading becomes a child of the closest preceding heading with a smaller level, so
/// skipped levels (`#` followed by `###`) still nest.
///
/// # Errors
///
/// Returns an error if there are no headings or if two headings share an id.
pub fn from_headings<'a>(headings: impl IntoIterator<Item = HeadingRef<'a>>) -> Result<Outline> {
    fn close(open: &mut Vec<(usize, Section)>, roots: &mut Vec<Section>) {
        if let Some((_, section)) = open.pop() {
            match open.last_mut() {
                Some((_, parent)) => parent.children.push(section),
                None => roots.push(section),
            }
        }
    }

    // Open sections with their heading levels; closed ones fold into their parent.
    let mut roots: Vec<Section> = Vec::new();
    let mut open: Vec<(usize, Section)> = Vec::new();

    for heading in headings {
        while open.last().is_some_and(|(level, _)| *level >= heading.level) {
            close(&mut open, &mut roots);
        }
        open.push((heading.level, Section::new(heading.id, heading.title)));
    }
    while !open.is_empty() {
        close(&mut open, &mut roots);
    }

    Outline::new(roots)
}

#[cfg(test)]
#[path = "tests/outline.rs"]
mod tests;
