//! Grouped QWERTY layout.
//!
//! Letters are arranged in groups; tapping a group opens an enlarged popover
//! holding just those keys.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Case {
    #[default]
    Lower,
    Upper,
}

impl Case {
    pub fn toggled(self) -> Self {
        match self {
            Case::Lower => Case::Upper,
            Case::Upper => Case::Lower,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyGroup {
    pub label: String,
    pub keys: Vec<String>,
}

impl KeyGroup {
    fn from_halves(left: &str, right: &str, case: Case) -> Self {
        let keys: Vec<String> = left
            .chars()
            .chain(right.chars())
            .map(|c| match case {
                Case::Lower => c.to_string(),
                Case::Upper => c.to_uppercase().to_string(),
            })
            .collect();

        let join = |part: &[String]| part.join("  ");
        let split = left.chars().count();
        let label = if right.is_empty() {
            join(&keys)
        } else {
            format!("{}    {}", join(&keys[..split]), join(&keys[split..]))
        };

        Self { label, keys }
    }
}

const TOP_GROUPS: [(&str, &str); 3] = [("qwe", "asd"), ("rtyu", "fgh"), ("iop", "jkl")];
const BOTTOM_GROUP: (&str, &str) = ("zxcvbnm", "");

/// The three top groups followed by the bottom `z`..`m` group.
pub fn key_groups(case: Case) -> Vec<KeyGroup> {
    TOP_GROUPS
        .iter()
        .chain(std::iter::once(&BOTTOM_GROUP))
        .map(|(left, right)| KeyGroup::from_halves(left, right, case))
        .collect()
}

/// Row split of an enlarged popover: the last three keys sit on the bottom row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnlargedTemplate {
    pub top: Vec<String>,
    pub bottom: Vec<String>,
}

impl EnlargedTemplate {
    pub fn for_keys(keys: &[String]) -> Self {
        let split = keys.len().saturating_sub(3);
        Self {
            top: keys[..split].to_vec(),
            bottom: keys[split..].to_vec(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_cover_the_alphabet_once() {
        let mut letters: Vec<String> = key_groups(Case::Lower)
            .into_iter()
            .flat_map(|group| group.keys)
            .collect();
        letters.sort();
        let expected: Vec<String> = ('a'..='z').map(|c| c.to_string()).collect();
        assert_eq!(letters, expected);
    }

    #[test]
    fn groups_keep_key_order_and_labels() {
        let groups = key_groups(Case::Lower);
        assert_eq!(groups[0].keys, ["q", "w", "e", "a", "s", "d"]);
        assert_eq!(groups[0].label, "q  w  e    a  s  d");
        assert_eq!(groups[3].label, "z  x  c  v  b  n  m");

        let upper = key_groups(Case::Upper);
        assert_eq!(upper[1].keys, ["R", "T", "Y", "U", "F", "G", "H"]);
    }

    #[test]
    fn enlarged_template_puts_three_keys_on_the_bottom_row() {
        let groups = key_groups(Case::Lower);

        let six = EnlargedTemplate::for_keys(&groups[0].keys);
        assert_eq!(six.top, ["q", "w", "e"]);
        assert_eq!(six.bottom, ["a", "s", "d"]);

        let seven = EnlargedTemplate::for_keys(&groups[3].keys);
        assert_eq!(seven.top, ["z", "x", "c", "v"]);
        assert_eq!(seven.bottom, ["b", "n", "m"]);
    }

    #[test]
    fn shift_toggles_case() {
        assert_eq!(Case::default().toggled(), Case::Upper);
        assert_eq!(Case::Upper.toggled(), Case::Lower);
    }
}
