//! Class descriptors — the facts the grammar is derived from.
//!
//! Each descriptor mirrors what reflection over one class of the game model
//! would report: its name and package, modifiers, enum constants, attribute
//! annotations, constructors and factory methods with their parameters,
//! the superclass and the type its evaluation method returns.

use serde::{Deserialize, Serialize};

use crate::base::constants::FACTORY_METHOD;
use crate::base::naming::{package_of, simple_name_of};

/// What kind of type a class descriptor describes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClassKind {
    #[default]
    Class,
    Interface,
    Enum,
}

/// Class-level annotations.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassAttributes {
    /// Token to use instead of the lower-camel class name.
    pub alias: Option<String>,
    /// Class is kept out of the grammar.
    pub hidden: bool,
}

/// Parameter-level annotations.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParamAttributes {
    pub optional: bool,
    pub named: bool,
    pub or: bool,
    pub or2: bool,
    pub and: bool,
    pub and2: bool,
}

/// One formal parameter of a constructor or factory method.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParamDescriptor {
    /// Declared type, with `[]` per collection level (`game.util.graph.Step[]`).
    #[serde(rename = "type")]
    pub type_name: String,
    /// Declared parameter name, when the schema generator could recover it.
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub attributes: ParamAttributes,
}

impl ParamDescriptor {
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            name: None,
            attributes: ParamAttributes::default(),
        }
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self.attributes.named = true;
        self
    }

    /// Record the declared name without surfacing it in the grammar.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn optional(mut self) -> Self {
        self.attributes.optional = true;
        self
    }

    pub fn or(mut self) -> Self {
        self.attributes.or = true;
        self
    }

    pub fn or2(mut self) -> Self {
        self.attributes.or2 = true;
        self
    }

    pub fn and(mut self) -> Self {
        self.attributes.and = true;
        self
    }

    pub fn and2(mut self) -> Self {
        self.attributes.and2 = true;
        self
    }
}

/// A public constructor or a static factory method.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConstructorDescriptor {
    /// `None` for constructors; the method name for static methods.
    #[serde(default)]
    pub method: Option<String>,
    #[serde(default = "default_true")]
    pub is_public: bool,
    #[serde(default)]
    pub is_static: bool,
    /// Constructor-level hide annotation.
    #[serde(default)]
    pub hidden: bool,
    #[serde(default)]
    pub params: Vec<ParamDescriptor>,
}

fn default_true() -> bool {
    true
}

impl ConstructorDescriptor {
    /// A public constructor.
    pub fn new(params: Vec<ParamDescriptor>) -> Self {
        Self {
            method: None,
            is_public: true,
            is_static: false,
            hidden: false,
            params,
        }
    }

    /// A public static `construct` factory.
    pub fn factory(params: Vec<ParamDescriptor>) -> Self {
        Self {
            method: Some(FACTORY_METHOD.to_string()),
            is_public: true,
            is_static: true,
            hidden: false,
            params,
        }
    }

    pub fn hidden(mut self) -> Self {
        self.hidden = true;
        self
    }

    pub fn private(mut self) -> Self {
        self.is_public = false;
        self
    }

    /// Whether this entry contributes a constructor clause.
    ///
    /// Public constructors and static methods named `construct` do.
    pub fn is_grammar_constructor(&self) -> bool {
        match &self.method {
            None => self.is_public,
            Some(name) => self.is_static && name == FACTORY_METHOD,
        }
    }

    /// Whether this is a static factory method.
    pub fn is_factory(&self) -> bool {
        self.is_static && self.method.as_deref() == Some(FACTORY_METHOD)
    }
}

/// An enum declared inside another class.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NestedEnum {
    pub name: String,
    #[serde(default)]
    pub constants: Vec<String>,
}

/// Everything known about one class of the game model.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassDescriptor {
    pub qualified_name: String,
    #[serde(default)]
    pub kind: ClassKind,
    #[serde(default)]
    pub is_abstract: bool,
    /// Ordered enum constants (enum classes only).
    #[serde(default)]
    pub enum_constants: Vec<String>,
    #[serde(default)]
    pub nested_enums: Vec<NestedEnum>,
    #[serde(default)]
    pub attributes: ClassAttributes,
    #[serde(default)]
    pub constructors: Vec<ConstructorDescriptor>,
    /// Qualified name of the direct superclass or implemented base.
    #[serde(default)]
    pub superclass: Option<String>,
    /// Declared return type of the value-producing method, if any.
    #[serde(default)]
    pub eval_return: Option<String>,
    /// Qualified name of the composite this class is a part of.
    #[serde(default)]
    pub sub_ludeme_of: Option<String>,
}

impl ClassDescriptor {
    fn with_kind(qualified_name: impl Into<String>, kind: ClassKind) -> Self {
        Self {
            qualified_name: qualified_name.into(),
            kind,
            is_abstract: kind == ClassKind::Interface,
            enum_constants: Vec::new(),
            nested_enums: Vec::new(),
            attributes: ClassAttributes::default(),
            constructors: Vec::new(),
            superclass: None,
            eval_return: None,
            sub_ludeme_of: None,
        }
    }

    /// A concrete class.
    pub fn class(qualified_name: impl Into<String>) -> Self {
        Self::with_kind(qualified_name, ClassKind::Class)
    }

    /// An interface (always abstract).
    pub fn interface(qualified_name: impl Into<String>) -> Self {
        Self::with_kind(qualified_name, ClassKind::Interface)
    }

    /// An enum with the given constants, in declaration order.
    pub fn enumeration<I, S>(qualified_name: impl Into<String>, constants: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut desc = Self::with_kind(qualified_name, ClassKind::Enum);
        desc.enum_constants = constants.into_iter().map(Into::into).collect();
        desc
    }

    pub fn abstract_class(mut self) -> Self {
        self.is_abstract = true;
        self
    }

    pub fn alias(mut self, alias: impl Into<String>) -> Self {
        self.attributes.alias = Some(alias.into());
        self
    }

    pub fn hidden(mut self) -> Self {
        self.attributes.hidden = true;
        self
    }

    pub fn extends(mut self, superclass: impl Into<String>) -> Self {
        self.superclass = Some(superclass.into());
        self
    }

    pub fn returns(mut self, type_name: impl Into<String>) -> Self {
        self.eval_return = Some(type_name.into());
        self
    }

    pub fn sub_ludeme_of(mut self, parent: impl Into<String>) -> Self {
        self.sub_ludeme_of = Some(parent.into());
        self
    }

    pub fn constructor(mut self, ctor: ConstructorDescriptor) -> Self {
        self.constructors.push(ctor);
        self
    }

    pub fn nested_enum<I, S>(mut self, name: impl Into<String>, constants: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.nested_enums.push(NestedEnum {
            name: name.into(),
            constants: constants.into_iter().map(Into::into).collect(),
        });
        self
    }

    pub fn simple_name(&self) -> &str {
        simple_name_of(&self.qualified_name)
    }

    pub fn package(&self) -> &str {
        package_of(&self.qualified_name)
    }

    pub fn is_enum(&self) -> bool {
        self.kind == ClassKind::Enum
    }

    pub fn is_interface(&self) -> bool {
        self.kind == ClassKind::Interface
    }

    /// Inner and anonymous classes carry a `$` in their binary name.
    pub fn is_inner(&self) -> bool {
        self.qualified_name.contains('$')
    }

    /// Documentation-only placeholder files.
    pub fn is_placeholder(&self) -> bool {
        matches!(self.simple_name(), "package-info" | "module-info")
    }

    pub fn has_factories(&self) -> bool {
        self.constructors.iter().any(ConstructorDescriptor::is_factory)
    }
}
