use lachs::Span;

#[lachs::token]
pub enum Token {
    #[terminal("case")]
    Case,
    #[terminal("of")]
    Of,
    #[terminal("let")]
    Let,
    #[terminal("in")]
    In,
    #[terminal("data")]
    Data,
    #[literal("[a-zA-Z_]+")]
    Ident,
    #[literal(r"[0-9]+\.[0-9]+")]
    FloatLiteral,
    #[literal("[0-9]+")]
    Integer,
    #[literal(r#""([^"\\]|\\.)*""#)]
    StringLiteral,
    #[terminal("->")]
    Arrow,
    #[terminal("::")]
    DoubleColon,
    #[terminal("=")]
    Equals,
    #[terminal("|")]
    Pipe,
    #[terminal("(")]
    LParen,
    #[terminal(")")]
    RParen,
    #[terminal("++")]
    DoublePlus,
    #[terminal("+")]
    Plus,
    #[terminal("-")]
    Minus,
    #[terminal("*")]
    Star,
    #[terminal("/")]
    Slash,
}

impl Token {
    pub fn pos(&self) -> Span {
        match self {
            Token::Case(inner) => inner.position.clone(),
            Token::Of(inner) => inner.position.clone(),
            Token::Let(inner) => inner.position.clone(),
            Token::In(inner) => inner.position.clone(),
            Token::Data(inner) => inner.position.clone(),
            Token::Ident(inner) => inner.position.clone(),
            Token::FloatLiteral(inner) => inner.position.clone(),
            Token::Integer(inner) => inner.position.clone(),
            Token::StringLiteral(inner) => inner.position.clone(),
            Token::Arrow(inner) => inner.position.clone(),
            Token::DoubleColon(inner) => inner.position.clone(),
            Token::Equals(inner) => inner.position.clone(),
            Token::Pipe(inner) => inner.position.clone(),
            Token::LParen(inner) => inner.position.clone(),
            Token::RParen(inner) => inner.position.clone(),
            Token::DoublePlus(inner) => inner.position.clone(),
            Token::Plus(inner) => inner.position.clone(),
            Token::Minus(inner) => inner.position.clone(),
            Token::Star(inner) => inner.position.clone(),
            Token::Slash(inner) => inner.position.clone(),
        }
    }

    /// Returns a human-readable description of the token
    pub fn describe(&self) -> String {
        match self {
            Token::Case(_) => "'case'".to_string(),
            Token::Of(_) => "'of'".to_string(),
            Token::Let(_) => "'let'".to_string(),
            Token::In(_) => "'in'".to_string(),
            Token::Data(_) => "'data'".to_string(),
            Token::Ident(inner) => format!("identifier '{}'", inner.value),
            Token::FloatLiteral(inner) => format!("float '{}'", inner.value),
            Token::Integer(inner) => format!("integer '{}'", inner.value),
            Token::StringLiteral(inner) => format!("string {}", inner.value),
            Token::Arrow(_) => "'->'".to_string(),
            Token::DoubleColon(_) => "'::'".to_string(),
            Token::Equals(_) => "'='".to_string(),
            Token::Pipe(_) => "'|'".to_string(),
            Token::LParen(_) => "'('".to_string(),
            Token::RParen(_) => "')'".to_string(),
            Token::DoublePlus(_) => "'++'".to_string(),
            Token::Plus(_) => "'+'".to_string(),
            Token::Minus(_) => "'-'".to_string(),
            Token::Star(_) => "'*'".to_string(),
            Token::Slash(_) => "'/'".to_string(),
        }
    }
}
