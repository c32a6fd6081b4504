/// Binary operators an equation may use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Operator {
    Add,
    Sub,
    Mul,
    Div,
    Pow,
}

impl Operator {
    pub const ALL: [Operator; 5] = [
        Operator::Add,
        Operator::Sub,
        Operator::Mul,
        Operator::Div,
        Operator::Pow,
    ];

    pub fn from_char(c: char) -> Option<Self> {
        match c {
            '+' => Some(Operator::Add),
            '-' => Some(Operator::Sub),
            '*' => Some(Operator::Mul),
            '/' => Some(Operator::Div),
            '^' => Some(Operator::Pow),
            _ => None,
        }
    }

    pub fn symbol(self) -> char {
        match self {
            Operator::Add => '+',
            Operator::Sub => '-',
            Operator::Mul => '*',
            Operator::Div => '/',
            Operator::Pow => '^',
        }
    }

    pub fn precedence(self) -> u8 {
        match self {
            Operator::Add | Operator::Sub => 1,
            Operator::Mul | Operator::Div => 2,
            Operator::Pow => 3,
        }
    }

    pub fn is_right_associative(self) -> bool {
        matches!(self, Operator::Pow)
    }

    fn bit(self) -> u8 {
        1 << (self as u8)
    }
}

/// The operators allowed in a round. Iterates in canonical `+ - * / ^` order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct OperatorSet {
    mask: u8,
}

impl OperatorSet {
    /// An empty set.
    pub fn new() -> Self {
        Self { mask: 0 }
    }

    pub fn all() -> Self {
        Operator::ALL.into_iter().collect()
    }

    pub fn insert(&mut self, op: Operator) {
        self.mask |= op.bit();
    }

    pub fn contains(&self, op: Operator) -> bool {
        self.mask & op.bit() != 0
    }

    pub fn contains_char(&self, c: char) -> bool {
        Operator::from_char(c).is_some_and(|op| self.contains(op))
    }

    pub fn iter(&self) -> impl Iterator<Item = Operator> + '_ {
        Operator::ALL.into_iter().filter(|op| self.contains(*op))
    }

    pub fn len(&self) -> usize {
        self.mask.count_ones() as usize
    }

    pub fn is_empty(&self) -> bool {
        self.mask == 0
    }
}

impl FromIterator<Operator> for OperatorSet {
    fn from_iter<I: IntoIterator<Item = Operator>>(iter: I) -> Self {
        let mut set = OperatorSet::new();
        for op in iter {
            set.insert(op);
        }
        set
    }
}

/// One lexical unit of a left-hand side under construction.
///
/// Numbers grow digit by digit during search, operators are always one
/// character long.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    Number(String),
    Operator(Operator),
}

impl Token {
    pub fn is_number(&self) -> bool {
        matches!(self, Token::Number(_))
    }

    pub fn is_operator(&self) -> bool {
        matches!(self, Token::Operator(_))
    }

    /// Number of characters this token occupies in the equation.
    pub fn len(&self) -> usize {
        match self {
            Token::Number(digits) => digits.len(),
            Token::Operator(_) => 1,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
