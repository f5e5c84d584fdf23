/// Whitelisted filter-DSL operators. Any key not listed here is an ordinary field name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    Gt,
    Gte,
    Lt,
    Lte,
    Ne,
    Eq,
    Not,
    Regexp,
    And,
    Or,
    Nor,
    In,
    NotIn,
    Expr,
    Match,
}

impl Operator {
    pub const ALL: [Self; 15] = [
        Self::Gt,
        Self::Gte,
        Self::Lt,
        Self::Lte,
        Self::Ne,
        Self::Eq,
        Self::Not,
        Self::Regexp,
        Self::And,
        Self::Or,
        Self::Nor,
        Self::In,
        Self::NotIn,
        Self::Expr,
        Self::Match,
    ];

    /// Exact, case-sensitive lookup of a DSL key.
    #[must_use]
    pub fn from_dsl(key: &str) -> Option<Self> {
        Some(match key {
            "gt" => Self::Gt,
            "gte" => Self::Gte,
            "lt" => Self::Lt,
            "lte" => Self::Lte,
            "ne" => Self::Ne,
            "eq" => Self::Eq,
            "not" => Self::Not,
            "regexp" => Self::Regexp,
            "and" => Self::And,
            "or" => Self::Or,
            "nor" => Self::Nor,
            "in" => Self::In,
            "notIn" => Self::NotIn,
            "expr" => Self::Expr,
            "match" => Self::Match,
            _ => return None,
        })
    }

    #[must_use]
    pub const fn dsl_name(self) -> &'static str {
        match self {
            Self::Gt => "gt",
            Self::Gte => "gte",
            Self::Lt => "lt",
            Self::Lte => "lte",
            Self::Ne => "ne",
            Self::Eq => "eq",
            Self::Not => "not",
            Self::Regexp => "regexp",
            Self::And => "and",
            Self::Or => "or",
            Self::Nor => "nor",
            Self::In => "in",
            Self::NotIn => "notIn",
            Self::Expr => "expr",
            Self::Match => "match",
        }
    }

    /// The store operator symbol this DSL name maps to.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Gt => "$gt",
            Self::Gte => "$gte",
            Self::Lt => "$lt",
            Self::Lte => "$lte",
            Self::Ne => "$ne",
            Self::Eq => "$eq",
            Self::Not => "$not",
            Self::Regexp => "$regex",
            Self::And => "$and",
            Self::Or => "$or",
            Self::Nor => "$nor",
            Self::In => "$in",
            Self::NotIn => "$nin",
            Self::Expr => "$expr",
            Self::Match => "$match",
        }
    }
}
