//! Index sets and typed indices.
//!
//! A dimension of a model is a zero-sized marker type implementing [IndexTag], normally declared
//! with one of the macros [index_set!](crate::index_set), [range_set!](crate::range_set) and
//! [range_bound!](crate::range_bound). The marker type only identifies the dimension; the labels
//! themselves live in the [IndexRegistry] owned by a [Model](crate::Model), so several models can
//! use the same marker types with different data.
//!
//! Values of [Index] are lightweight handles holding the raw (0-based) position in the set.

use std::any::TypeId;
use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;
use std::marker::PhantomData;

use crate::error::{ModelError,Result};

pub mod compound;
pub use compound::*;

/// How the members of a dimension are defined.
#[derive(Debug,Clone,Copy,PartialEq,Eq)]
pub enum SetKind {
    /// Explicit labels added one by one.
    Labels,
    /// Integers `lower ..= upper`.
    Range { lower : i64, upper : RangeUpper },
}

/// Upper end of an integer range.
#[derive(Debug,Clone,Copy,PartialEq,Eq)]
pub enum RangeUpper {
    Fixed(i64),
    /// The value of a [RangeBound], set per model with [Model::set_value](crate::Model::set_value).
    Bound { id : TypeId, name : &'static str },
}

/// A marker type identifying one dimension.
pub trait IndexTag : 'static {
    const NAME : &'static str;
    fn kind() -> SetKind;
}

/// A dimension defined as an integer range. `LOWER` is the value of the first element.
pub trait RangeTag : IndexTag {
    const LOWER : i64;
}

/// A named integer whose value defines the upper end of one or more ranges.
pub trait RangeBound : 'static {
    const NAME : &'static str;
}

/// Declare a dimension whose members are explicit labels.
///
/// # Example
/// ```
/// use milpmodel::*;
/// index_set!(pub FOOD);
/// let mut m = Model::new(Some("diet"));
/// let beef = m.add_label::<FOOD>("BEEF").unwrap();
/// assert_eq!(beef.raw(), 0);
/// ```
#[macro_export]
macro_rules! index_set {
    ($vis:vis $name:ident) => {
        #[derive(Debug,Clone,Copy,PartialEq,Eq,Hash,PartialOrd,Ord)]
        $vis struct $name;
        impl $crate::index::IndexTag for $name {
            const NAME : &'static str = stringify!($name);
            fn kind() -> $crate::index::SetKind { $crate::index::SetKind::Labels }
        }
    };
}

/// Declare a named integer used as the upper end of a [range_set!](crate::range_set).
#[macro_export]
macro_rules! range_bound {
    ($vis:vis $name:ident) => {
        #[derive(Debug,Clone,Copy,PartialEq,Eq,Hash,PartialOrd,Ord)]
        $vis struct $name;
        impl $crate::index::RangeBound for $name {
            const NAME : &'static str = stringify!($name);
        }
    };
}

/// Declare a dimension that is an integer range. The upper end is either a literal or a
/// [range_bound!](crate::range_bound) whose value is set per model.
///
/// # Example
/// ```
/// use milpmodel::*;
/// range_bound!(pub T);
/// range_set!(pub WEEK = 1 ..= T);
/// range_set!(pub HOUR = 0 ..= 23);
///
/// let mut m = Model::new(None);
/// m.set_value::<T>(4).unwrap();
/// assert_eq!(m.set_size::<WEEK>().unwrap(), 4);
/// assert_eq!(m.set_size::<HOUR>().unwrap(), 24);
/// ```
#[macro_export]
macro_rules! range_set {
    ($vis:vis $name:ident = $lower:literal ..= $upper:literal) => {
        #[derive(Debug,Clone,Copy,PartialEq,Eq,Hash,PartialOrd,Ord)]
        $vis struct $name;
        impl $crate::index::IndexTag for $name {
            const NAME : &'static str = stringify!($name);
            fn kind() -> $crate::index::SetKind {
                $crate::index::SetKind::Range{ lower : $lower, upper : $crate::index::RangeUpper::Fixed($upper) }
            }
        }
        impl $crate::index::RangeTag for $name { const LOWER : i64 = $lower; }
    };
    ($vis:vis $name:ident = $lower:literal ..= $bound:ident) => {
        #[derive(Debug,Clone,Copy,PartialEq,Eq,Hash,PartialOrd,Ord)]
        $vis struct $name;
        impl $crate::index::IndexTag for $name {
            const NAME : &'static str = stringify!($name);
            fn kind() -> $crate::index::SetKind {
                $crate::index::SetKind::Range{
                    lower : $lower,
                    upper : $crate::index::RangeUpper::Bound{
                        id   : ::std::any::TypeId::of::<$bound>(),
                        name : <$bound as $crate::index::RangeBound>::NAME } }
            }
        }
        impl $crate::index::RangeTag for $name { const LOWER : i64 = $lower; }
    };
}

//======================================================
// Index
//======================================================

/// Typed handle to one member of the dimension `T`.
///
/// The handle holds only the raw offset; it is checked against the size of the set whenever it is
/// used to address a parameter or a variable.
pub struct Index<T> {
    raw : usize,
    tag : PhantomData<fn() -> T>
}

impl<T> Clone for Index<T> { fn clone(&self) -> Self { *self } }
impl<T> Copy for Index<T> {}
impl<T> PartialEq for Index<T> { fn eq(&self, other : &Self) -> bool { self.raw == other.raw } }
impl<T> Eq for Index<T> {}
impl<T> PartialOrd for Index<T> { fn partial_cmp(&self, other : &Self) -> Option<std::cmp::Ordering> { Some(self.cmp(other)) } }
impl<T> Ord for Index<T> { fn cmp(&self, other : &Self) -> std::cmp::Ordering { self.raw.cmp(&other.raw) } }
impl<T> Hash for Index<T> { fn hash<H : std::hash::Hasher>(&self, state : &mut H) { self.raw.hash(state) } }

impl<T : IndexTag> fmt::Debug for Index<T> {
    fn fmt(&self, f : &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f,"{}#{}",T::NAME,self.raw)
    }
}

impl<T> Index<T> {
    /// Create an index from a raw offset. The offset is not checked.
    pub fn new(raw : usize) -> Index<T> { Index{ raw, tag : PhantomData } }
    /// The first element of the set.
    pub fn first() -> Index<T> { Index::new(0) }
    /// Raw 0-based offset.
    pub fn raw(&self) -> usize { self.raw }
    /// 1-based ordinal position.
    pub fn ord(&self) -> usize { self.raw+1 }
}

impl<T : IndexTag> Index<T> {
    /// The preceding element.
    ///
    /// # Returns
    /// [ModelError::InvalidIndex] if this is the first element.
    pub fn prev(&self) -> Result<Index<T>> {
        if self.raw == 0 {
            Err(ModelError::InvalidIndex(format!("prev() of the first element of `{}`",T::NAME)))
        }
        else {
            Ok(Index::new(self.raw-1))
        }
    }
}

impl<T : RangeTag> Index<T> {
    /// The integer value of a range element.
    pub fn value(&self) -> i64 { T::LOWER + self.raw as i64 }

    /// The element with the given integer value. Only the lower end is checked here; the upper
    /// end is checked when the index is used.
    pub fn from_value(value : i64) -> Result<Index<T>> {
        if value < T::LOWER {
            Err(ModelError::InvalidIndex(format!("{} is below the first element {} of `{}`",value,T::LOWER,T::NAME)))
        }
        else {
            Ok(Index::new((value-T::LOWER) as usize))
        }
    }

    /// Map this element to the element with the same value in another range.
    pub fn convert<U : RangeTag>(&self) -> Result<Index<U>> { Index::<U>::from_value(self.value()) }
}

//======================================================
// IndexSet
//======================================================

/// An ordered collection of unique labels.
#[derive(Debug,Clone,Default)]
pub struct IndexSet {
    name   : String,
    labels : Vec<String>,
    lookup : HashMap<String,usize>,
}

impl IndexSet {
    pub fn new(name : &str) -> IndexSet { IndexSet{ name : name.to_string(), ..Default::default() } }

    /// Append a label and return its offset. Duplicates are rejected.
    pub fn add(&mut self, label : &str) -> Result<usize> {
        if self.lookup.contains_key(label) {
            Err(ModelError::InvalidIndex(format!("duplicate label `{}` in `{}`",label,self.name)))
        }
        else {
            let i = self.labels.len();
            self.labels.push(label.to_string());
            self.lookup.insert(label.to_string(),i);
            Ok(i)
        }
    }

    pub fn index_of(&self, label : &str) -> Result<usize> {
        self.lookup.get(label).copied()
            .ok_or_else(|| ModelError::InvalidIndex(format!("`{}` is not a member of `{}`",label,self.name)))
    }

    pub fn name(&self, offset : usize) -> Result<&str> {
        self.labels.get(offset)
            .map(|s| s.as_str())
            .ok_or_else(|| ModelError::InvalidIndex(format!("offset {} is outside `{}` (size {})",offset,self.name,self.labels.len())))
    }

    pub fn size(&self) -> usize { self.labels.len() }
    pub fn labels(&self) -> &[String] { self.labels.as_slice() }
}

//======================================================
// IndexRegistry
//======================================================

/// Per-model storage of labels and range bounds, keyed by marker type.
#[derive(Debug,Default)]
pub struct IndexRegistry {
    sets   : HashMap<TypeId,IndexSet>,
    bounds : HashMap<TypeId,i64>,
    sealed : bool,
}

impl IndexRegistry {
    pub fn new() -> IndexRegistry { Default::default() }

    pub fn is_sealed(&self) -> bool { self.sealed }
    pub(crate) fn seal(&mut self) { self.sealed = true; }

    fn check_open(&self, what : &str) -> Result<()> {
        if self.sealed { Err(ModelError::Sealed(what.to_string())) } else { Ok(()) }
    }

    /// Append a label to a labelled dimension.
    pub fn add_label<T : IndexTag>(&mut self, label : &str) -> Result<Index<T>> {
        self.check_open(&format!("cannot add `{}` to `{}`",label,T::NAME))?;
        match T::kind() {
            SetKind::Labels =>
                self.sets.entry(TypeId::of::<T>())
                    .or_insert_with(|| IndexSet::new(T::NAME))
                    .add(label)
                    .map(Index::new),
            SetKind::Range{..} =>
                Err(ModelError::Unsupported(format!("`{}` is an integer range, labels cannot be added",T::NAME)))
        }
    }

    /// Set the value of a range bound.
    pub fn set_value<B : RangeBound>(&mut self, value : i64) -> Result<()> {
        self.check_open(&format!("cannot set `{}`",B::NAME))?;
        self.bounds.insert(TypeId::of::<B>(),value);
        Ok(())
    }

    /// Get the value of a range bound, if it has been set.
    pub fn value<B : RangeBound>(&self) -> Option<i64> { self.bounds.get(&TypeId::of::<B>()).copied() }

    /// The labelled set for `T`, if any label has been added.
    pub fn set<T : IndexTag>(&self) -> Option<&IndexSet> { self.sets.get(&TypeId::of::<T>()) }

    fn range_limits<T : IndexTag>(&self) -> Result<Option<(i64,i64)>> {
        match T::kind() {
            SetKind::Labels => Ok(None),
            SetKind::Range{ lower, upper : RangeUpper::Fixed(upper) } => Ok(Some((lower,upper))),
            SetKind::Range{ lower, upper : RangeUpper::Bound{ id, name } } =>
                self.bounds.get(&id)
                    .map(|&upper| Some((lower,upper)))
                    .ok_or_else(|| ModelError::IncompleteData(format!("range `{}` needs a value for `{}`",T::NAME,name)))
        }
    }

    /// Number of elements in `T`. A labelled set that never received a label is empty.
    pub fn size<T : IndexTag>(&self) -> Result<usize> {
        match self.range_limits::<T>()? {
            None => Ok(self.set::<T>().map(|s| s.size()).unwrap_or(0)),
            Some((lower,upper)) => Ok(if upper < lower { 0 } else { (upper-lower+1) as usize })
        }
    }

    /// Offset of an element given by label. For integer ranges the label is the decimal value.
    pub fn index_of<T : IndexTag>(&self, label : &str) -> Result<usize> {
        match self.range_limits::<T>()? {
            None =>
                self.set::<T>()
                    .ok_or_else(|| ModelError::InvalidIndex(format!("`{}` is not a member of `{}`",label,T::NAME)))
                    .and_then(|s| s.index_of(label)),
            Some((lower,upper)) => {
                let v = label.trim().parse::<i64>()
                    .map_err(|_| ModelError::InvalidIndex(format!("`{}` is not an integer member of `{}`",label,T::NAME)))?;
                if v < lower || v > upper {
                    Err(ModelError::InvalidIndex(format!("{} is outside `{}` = {}..={}",v,T::NAME,lower,upper)))
                }
                else {
                    Ok((v-lower) as usize)
                }
            }
        }
    }

    /// Label of the element at `offset`.
    pub fn label<T : IndexTag>(&self, offset : usize) -> Result<String> {
        let size = self.size::<T>()?;
        if offset >= size {
            return Err(ModelError::InvalidIndex(format!("offset {} is outside `{}` (size {})",offset,T::NAME,size)));
        }
        match self.range_limits::<T>()? {
            None => self.set::<T>()
                .ok_or_else(|| ModelError::InvalidIndex(format!("`{}` is empty",T::NAME)))
                .and_then(|s| s.name(offset).map(|s| s.to_string())),
            Some((lower,_)) => Ok((lower + offset as i64).to_string())
        }
    }
}

//======================================================
// Labels
//======================================================

/// Anything that can name an element of a dimension: strings for labelled sets, integers for
/// ranges.
pub trait IntoLabel {
    fn to_label(&self) -> String;
}

impl IntoLabel for &str { fn to_label(&self) -> String { self.to_string() } }
impl IntoLabel for String { fn to_label(&self) -> String { self.clone() } }
impl IntoLabel for &String { fn to_label(&self) -> String { (*self).clone() } }
impl IntoLabel for i32 { fn to_label(&self) -> String { self.to_string() } }
impl IntoLabel for i64 { fn to_label(&self) -> String { self.to_string() } }
impl IntoLabel for usize { fn to_label(&self) -> String { self.to_string() } }
