use std::collections::HashMap;

use ndarray::Array2;

/// Statistics for a single connected component.
#[derive(Clone, Debug)]
pub struct ComponentStats {
    /// Label of this component in [`ComponentLabels::labels`].
    pub label: u32,
    /// Number of pixels in the component.
    pub area: usize,
}

/// Label image plus per-component statistics.
#[derive(Clone, Debug)]
pub struct ComponentLabels {
    /// 0 for background, otherwise the component label.
    pub labels: Array2<u32>,
    /// Sorted by area descending (largest first).
    pub stats: Vec<ComponentStats>,
}

/// Label 8-connected regions of a binary mask using two-pass labeling with
/// union-find.
pub fn connected_components_8(mask: &Array2<bool>) -> ComponentLabels {
    let (h, w) = mask.dim();
    let mut labels = Array2::<u32>::zeros((h, w));
    if h == 0 || w == 0 {
        return ComponentLabels {
            labels,
            stats: Vec::new(),
        };
    }

    let mut next_label: u32 = 1;
    // Union-find parent array. Index 0 unused; labels start at 1.
    let mut parent: Vec<u32> = vec![0; h * w / 2 + 2];

    // Pass 1: provisional labels from the already-visited neighbors
    // (upper-left, up, upper-right, left).
    for row in 0..h {
        for col in 0..w {
            if !mask[[row, col]] {
                continue;
            }

            let mut neighbors = [0u32; 4];
            if col > 0 {
                neighbors[0] = labels[[row, col - 1]];
            }
            if row > 0 {
                neighbors[1] = labels[[row - 1, col]];
                if col > 0 {
                    neighbors[2] = labels[[row - 1, col - 1]];
                }
                if col + 1 < w {
                    neighbors[3] = labels[[row - 1, col + 1]];
                }
            }

            let smallest = neighbors.iter().copied().filter(|&l| l > 0).min();
            match smallest {
                None => {
                    if next_label as usize >= parent.len() {
                        parent.resize(parent.len() * 2, 0);
                    }
                    parent[next_label as usize] = next_label;
                    labels[[row, col]] = next_label;
                    next_label += 1;
                }
                Some(smallest) => {
                    labels[[row, col]] = smallest;
                    for &other in neighbors.iter().filter(|&&l| l > 0 && l != smallest) {
                        union(&mut parent, smallest, other);
                    }
                }
            }
        }
    }

    // Flatten parent references.
    for i in 1..next_label as usize {
        parent[i] = find(&parent, i as u32);
    }

    // Pass 2: resolve labels and collect stats.
    let mut stats_map = HashMap::<u32, ComponentStats>::new();

    for row in 0..h {
        for col in 0..w {
            let lbl = labels[[row, col]];
            if lbl == 0 {
                continue;
            }
            let root = parent[lbl as usize];
            labels[[row, col]] = root;

            stats_map
                .entry(root)
                .or_insert(ComponentStats {
                    label: root,
                    area: 0,
                })
                .area += 1;
        }
    }

    let mut stats: Vec<ComponentStats> = stats_map.into_values().collect();
    stats.sort_unstable_by(|a, b| b.area.cmp(&a.area).then(a.label.cmp(&b.label)));
    ComponentLabels { labels, stats }
}

fn find(parent: &[u32], mut x: u32) -> u32 {
    while parent[x as usize] != x {
        x = parent[x as usize];
    }
    x
}

fn union(parent: &mut [u32], a: u32, b: u32) {
    let ra = find(parent, a);
    let rb = find(parent, b);
    if ra != rb {
        // Merge larger root into smaller root to keep labels consistent.
        let (small, big) = if ra < rb { (ra, rb) } else { (rb, ra) };
        parent[big as usize] = small;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn diagonal_pixels_are_connected() {
        let mut mask = Array2::from_elem((3, 3), false);
        mask[[0, 0]] = true;
        mask[[1, 1]] = true;
        mask[[2, 2]] = true;
        let result = connected_components_8(&mask);
        assert_eq!(result.stats.len(), 1);
        assert_eq!(result.stats[0].area, 3);
    }

    #[test]
    fn anti_diagonal_merges_two_provisional_labels() {
        // Row 0 starts two labels that only meet through (1, 1).
        let mut mask = Array2::from_elem((2, 3), false);
        mask[[0, 0]] = true;
        mask[[0, 2]] = true;
        mask[[1, 1]] = true;
        let result = connected_components_8(&mask);
        assert_eq!(result.stats.len(), 1);
        assert_eq!(result.labels[[0, 0]], result.labels[[0, 2]]);
    }

    #[test]
    fn separated_regions_get_distinct_labels() {
        let mut mask = Array2::from_elem((1, 5), false);
        mask[[0, 0]] = true;
        mask[[0, 1]] = true;
        mask[[0, 4]] = true;
        let result = connected_components_8(&mask);
        assert_eq!(result.stats.len(), 2);
        assert_eq!(result.stats[0].area, 2);
        assert_eq!(result.stats[1].area, 1);
        assert_ne!(result.labels[[0, 0]], result.labels[[0, 4]]);
        assert_eq!(result.labels[[0, 2]], 0);
    }
}
