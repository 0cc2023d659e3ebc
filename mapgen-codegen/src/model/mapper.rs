use mapgen_ir::ClassId;
use serde::Serialize;

/// A generated `fun <Source>.mapTo<Suffix>(): <Target>` extension.
#[derive(Debug, Clone, Serialize)]
pub struct MapperFn {
    /// The class the function extends.
    pub source: ClassId,
    /// Function type-parameter declaration (e.g. `<T : Any>`), or empty.
    pub type_params: String,
    /// Receiver type as seen from the generated file (e.g. `Outer.Inner`).
    pub receiver: String,
    /// Function name, `mapTo<Suffix>`.
    pub name: String,
    /// Return type (e.g. `OuterModel.InnerModel`).
    pub returns: String,
    pub body: MapperBody,
}

/// Body expression of a mapper function.
#[derive(Debug, Clone, Serialize)]
pub enum MapperBody {
    /// `Target(arg = expr, ...)`, arguments in declaration order.
    Construct { target: String, args: Vec<MapperArg> },
    /// `when (this) { Source.A -> Target.A ... }` for enums.
    EnumWhen { arms: Vec<WhenArm> },
}

/// A named constructor argument.
#[derive(Debug, Clone, Serialize)]
pub struct MapperArg {
    /// Parameter name on the generated class.
    pub name: String,
    /// Property read from the receiver.
    pub source: String,
    /// Whether the source property is nullable.
    pub nullable: bool,
    pub conversion: Conversion,
}

/// One branch of an enum-to-enum `when`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WhenArm {
    pub from: String,
    pub to: String,
}

/// How a source value becomes a target value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Conversion {
    /// The value is passed through.
    Identity,
    /// Call the generated mapper: `value.mapTo<Suffix>()`.
    Mapper { function: String },
    /// Exhaustive `when` over enum entries.
    EnumWhen { arms: Vec<WhenArm> },
    /// `value.map { ... }` plus an optional call restoring the collection type.
    Collection {
        element: Box<Conversion>,
        element_nullable: bool,
        collect: Option<&'static str>,
    },
    /// Rebuild a map entry by entry into `builder` (e.g. `HashMap<K, V>`).
    Map {
        builder: String,
        key: Box<Conversion>,
        key_nullable: bool,
        value: Box<Conversion>,
        value_nullable: bool,
    },
    /// Destructure a pair and convert both halves.
    Pair {
        first: Box<Conversion>,
        first_nullable: bool,
        second: Box<Conversion>,
        second_nullable: bool,
    },
    /// `TODO("Implement manually")`
    Placeholder,
}

impl Conversion {
    pub fn is_identity(&self) -> bool {
        matches!(self, Conversion::Identity)
    }

    /// Element-wise conversion; identity when elements need none.
    pub fn collection(
        element: Conversion,
        element_nullable: bool,
        collect: Option<&'static str>,
    ) -> Self {
        if element.is_identity() {
            return Conversion::Identity;
        }
        Conversion::Collection {
            element: Box::new(element),
            element_nullable,
            collect,
        }
    }

    /// Entry-wise conversion; identity when neither keys nor values change.
    pub fn map(
        builder: String,
        (key, key_nullable): (Conversion, bool),
        (value, value_nullable): (Conversion, bool),
    ) -> Self {
        if key.is_identity() && value.is_identity() {
            return Conversion::Identity;
        }
        Conversion::Map {
            builder,
            key: Box::new(key),
            key_nullable,
            value: Box::new(value),
            value_nullable,
        }
    }

    /// Pair conversion; identity when neither half changes.
    pub fn pair(
        (first, first_nullable): (Conversion, bool),
        (second, second_nullable): (Conversion, bool),
    ) -> Self {
        if first.is_identity() && second.is_identity() {
            return Conversion::Identity;
        }
        Conversion::Pair {
            first: Box::new(first),
            first_nullable,
            second: Box::new(second),
            second_nullable,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mapper() -> Conversion {
        Conversion::Mapper {
            function: "mapToDto".to_string(),
        }
    }

    #[test]
    fn test_identity_collapses() {
        let set = Conversion::collection(Conversion::Identity, false, Some("toSet()"));
        let map = Conversion::map(
            "HashMap<String, Int>".to_string(),
            (Conversion::Identity, false),
            (Conversion::Identity, true),
        );
        let pair = Conversion::pair((Conversion::Identity, false), (Conversion::Identity, false));

        assert!(set.is_identity());
        assert!(map.is_identity());
        assert!(pair.is_identity());
    }

    #[test]
    fn test_non_identity_is_kept() {
        let list = Conversion::collection(mapper(), true, None);
        assert_eq!(
            list,
            Conversion::Collection {
                element: Box::new(mapper()),
                element_nullable: true,
                collect: None,
            }
        );
        let pair = Conversion::pair((Conversion::Identity, false), (mapper(), false));
        assert!(matches!(pair, Conversion::Pair { .. }));
    }
}
