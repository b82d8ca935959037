use serde::{Deserialize, Serialize};
use tracing::warn;

/// Optional rule toggles for one game. Immutable once the game is built.
///
/// `same_wall` only has meaning together with `same`; every constructor
/// normalises it away otherwise. `combo` is derived, see [`Rules::combo`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Rules {
    pub elemental: bool,
    pub same: bool,
    pub same_wall: bool,
    pub plus: bool,
    pub sudden_death: bool,
}

impl Rules {
    #[inline]
    pub fn new(elemental: bool, same: bool, same_wall: bool, plus: bool, sudden_death: bool) -> Self {
        Self {
            elemental,
            same,
            same_wall,
            plus,
            sudden_death,
        }
        .normalized()
    }

    #[inline]
    pub const fn basic_only() -> Self {
        Self {
            elemental: false,
            same: false,
            same_wall: false,
            plus: false,
            sudden_death: false,
        }
    }

    #[inline]
    pub const fn all_enabled() -> Self {
        Self {
            elemental: true,
            same: true,
            same_wall: true,
            plus: true,
            sudden_death: true,
        }
    }

    /// Chain reactions run whenever Same or Plus is in play.
    #[inline]
    pub const fn combo(&self) -> bool {
        self.same || self.plus
    }

    /// Coerce `same_wall` off when `same` is disabled.
    pub fn normalized(mut self) -> Self {
        if self.same_wall && !self.same {
            warn!("same_wall requires same; disabling same_wall");
            self.same_wall = false;
        }
        self
    }

    /// Parse a comma-separated toggle list such as `elemental,same,plus`.
    /// `none` (or an empty string) yields basic rules, `all` enables everything.
    pub fn parse(s: &str) -> Result<Self, String> {
        let s = s.trim();
        if s.is_empty() || s.eq_ignore_ascii_case("none") {
            return Ok(Self::basic_only());
        }
        if s.eq_ignore_ascii_case("all") {
            return Ok(Self::all_enabled());
        }
        let mut r = Self::basic_only();
        for tok in s.split(',') {
            match tok.trim().to_ascii_lowercase().as_str() {
                "elemental" => r.elemental = true,
                "same" => r.same = true,
                "same_wall" | "samewall" => r.same_wall = true,
                "plus" => r.plus = true,
                "sudden_death" | "suddendeath" => r.sudden_death = true,
                "" => {}
                other => return Err(format!("unknown rule '{other}'")),
            }
        }
        Ok(r.normalized())
    }
}

impl std::fmt::Display for Rules {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names = [
            (self.elemental, "elemental"),
            (self.same, "same"),
            (self.same_wall, "same_wall"),
            (self.plus, "plus"),
            (self.sudden_death, "sudden_death"),
        ];
        let on: Vec<&str> = names.iter().filter(|(b, _)| *b).map(|(_, n)| *n).collect();
        if on.is_empty() {
            f.write_str("none")
        } else {
            f.write_str(&on.join(","))
        }
    }
}
