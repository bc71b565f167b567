use std::fmt::Display;

use miette::{bail, Error};

/// Runtime type a subject can be tested against with a type pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Type {
    Nil,
    Boolean,
    Integer,
    Float,
    // Integer or Float
    Numeric,
    String,
    Symbol,
    Array,
    Map,

    // Opaque object of a named class
    Object(String), // class_name
}

impl TryFrom<&str> for Type {
    type Error = Error;
    fn try_from(type_str: &str) -> Result<Self, Self::Error> {
        let type_str = type_str.trim();

        let value_type = match type_str {
            "Nil" | "NilClass" => Type::Nil,
            "Boolean" | "Bool" => Type::Boolean,
            "Integer" => Type::Integer,
            "Float" => Type::Float,
            "Numeric" => Type::Numeric,
            "String" => Type::String,
            "Symbol" => Type::Symbol,
            "Array" => Type::Array,
            "Hash" | "Map" => Type::Map,
            "" => bail!("Type name cannot be empty"),
            _ if !type_str.starts_with(|char: char| char.is_ascii_uppercase()) => {
                bail!("Type names have to be capitalized, got {:?}", type_str)
            }
            _ => Type::Object(type_str.to_string()),
        };

        Ok(value_type)
    }
}

impl Display for Type {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Type::Nil => write!(f, "Nil"),
            Type::Boolean => write!(f, "Boolean"),
            Type::Integer => write!(f, "Integer"),
            Type::Float => write!(f, "Float"),
            Type::Numeric => write!(f, "Numeric"),
            Type::String => write!(f, "String"),
            Type::Symbol => write!(f, "Symbol"),
            Type::Array => write!(f, "Array"),
            Type::Map => write!(f, "Hash"),
            Type::Object(class_name) => write!(f, "{class_name}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Type;

    #[test]
    fn parse_type_names() {
        let parsed: Type = "Integer".try_into().unwrap();
        assert_eq!(parsed, Type::Integer);
        let parsed: Type = " Hash ".try_into().unwrap();
        assert_eq!(parsed, Type::Map);
        let parsed: Type = "Point".try_into().unwrap();
        assert_eq!(parsed, Type::Object("Point".into()));

        assert!(Type::try_from("").is_err());
        assert!(Type::try_from("point").is_err());
    }
}
