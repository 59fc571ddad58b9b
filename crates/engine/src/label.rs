//! Closed label sets for each linguistic variable.
//!
//! Label names are only strings at the configuration boundary; inside the
//! engine every label is a variant of its variable's enum, so a rule can never
//! refer to a set that does not exist.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::Hash;

/// The label set of one linguistic variable.
pub trait Label:
    Copy + Eq + Ord + Hash + fmt::Debug + fmt::Display + Send + Sync + 'static
{
    /// Name of the variable these labels belong to.
    const VARIABLE: &'static str;
    /// Every label, in index order.
    const ALL: &'static [Self];

    /// The label's configuration name.
    fn as_str(self) -> &'static str;

    /// Dense index in `0..ALL.len()`.
    fn index(self) -> usize;

    /// Resolve a configuration name.
    fn parse(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|l| l.as_str() == name)
    }
}

macro_rules! labels {
    (
        $(#[$meta:meta])*
        $name:ident for $variable:literal { $($variant:ident => $text:literal),+ $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(rename_all = "lowercase")]
        pub enum $name {
            $(
                #[doc = concat!("`", $text, "`")]
                $variant,
            )+
        }

        impl Label for $name {
            const VARIABLE: &'static str = $variable;
            const ALL: &'static [Self] = &[$(Self::$variant),+];

            fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $text,)+
                }
            }

            fn index(self) -> usize {
                self as usize
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.pad(self.as_str())
            }
        }
    };
}

/// Name of the quality input.
pub const KUALITAS: &str = "kualitas";
/// Name of the popularity input.
pub const POPULARITAS: &str = "popularitas";
/// Name of the price input.
pub const HARGA: &str = "harga";
/// Name of the output.
pub const REKOMENDASI: &str = "rekomendasi";

labels! {
    /// Labels of `kualitas` (share of positive ratings).
    QualityLabel for "kualitas" {
        Rendah => "rendah",
        Sedang => "sedang",
        Tinggi => "tinggi",
    }
}

labels! {
    /// Labels of `popularitas` (normalized owners and concurrent players).
    PopularityLabel for "popularitas" {
        Rendah => "rendah",
        Sedang => "sedang",
        Tinggi => "tinggi",
    }
}

labels! {
    /// Labels of `harga`. The input is an inverted price, so `murah` sits at the top.
    PriceLabel for "harga" {
        Mahal => "mahal",
        Normal => "normal",
        Murah => "murah",
    }
}

labels! {
    /// Labels of the `rekomendasi` output.
    RecommendationLabel for "rekomendasi" {
        Lemah => "lemah",
        Sedang => "sedang",
        Kuat => "kuat",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn indices_are_dense() {
        for (i, l) in PriceLabel::ALL.iter().enumerate() {
            assert_eq!(l.index(), i);
        }
        for (i, l) in RecommendationLabel::ALL.iter().enumerate() {
            assert_eq!(l.index(), i);
        }
    }

    #[test]
    fn parse_round_trips_names() {
        assert_eq!(QualityLabel::parse("tinggi"), Some(QualityLabel::Tinggi));
        assert_eq!(PriceLabel::parse("murah"), Some(PriceLabel::Murah));
        assert_eq!(PriceLabel::parse("tinggi"), None);
        assert_eq!(RecommendationLabel::parse("Kuat"), None);
    }

    #[test]
    fn variables_are_named() {
        assert_eq!(QualityLabel::VARIABLE, KUALITAS);
        assert_eq!(PopularityLabel::VARIABLE, POPULARITAS);
        assert_eq!(PriceLabel::VARIABLE, HARGA);
        assert_eq!(RecommendationLabel::VARIABLE, REKOMENDASI);
    }

    #[test]
    fn serde_uses_lowercase_names() {
        let json = serde_json::to_string(&RecommendationLabel::Kuat).unwrap();
        assert_eq!(json, "\"kuat\"");
        let back: PopularityLabel = serde_json::from_str("\"sedang\"").unwrap();
        assert_eq!(back, PopularityLabel::Sedang);
    }
}
