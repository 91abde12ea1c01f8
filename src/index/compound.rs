//! Compound indexes: flat row-major offsets over the Cartesian product of several dimensions.

use itertools::Itertools;

use crate::error::{ModelError,Result};
use super::{Index,IndexRegistry,IndexTag,IntoLabel};

/// Row-major (mixed radix) encoding over a list of dimension sizes. The first dimension is the
/// most significant.
///
/// Nothing is cached; construct it from the current sizes each time they are needed.
#[derive(Debug,Clone,Copy)]
pub struct CompoundIndex<R> {
    sizes : R
}

impl<R> CompoundIndex<R> where R : AsRef<[usize]> {
    pub fn new(sizes : R) -> CompoundIndex<R> { CompoundIndex{ sizes } }

    pub fn sizes(&self) -> &[usize] { self.sizes.as_ref() }

    /// Number of elements in the product space. The product of no dimensions has one element.
    pub fn size(&self) -> usize { self.sizes.as_ref().iter().product() }

    /// Offset of the coordinates `raw`. The coordinates are not checked.
    pub fn offset(&self, raw : &[usize]) -> usize {
        raw.iter().zip(self.sizes.as_ref().iter()).fold(0,|acc,(&i,&d)| acc*d + i)
    }

    /// Offset of the coordinates `raw`, or `None` if a coordinate is outside its dimension.
    pub fn checked_offset(&self, raw : &[usize]) -> Option<usize> {
        if raw.len() == self.sizes.as_ref().len() && raw.iter().zip(self.sizes.as_ref().iter()).all(|(&i,&d)| i < d) {
            Some(self.offset(raw))
        }
        else {
            None
        }
    }

    /// Decode `offset` into coordinates.
    pub fn decode_into(&self, offset : usize, raw : &mut [usize]) {
        raw.iter_mut().zip(self.sizes.as_ref().iter()).rev().fold(offset,|v,(r,&d)| { *r = v % d; v / d });
    }

    /// Iterate over all coordinates in row-major order.
    pub fn iter<T>(&self) -> CompoundIndexIter<T> where T : AsMut<[usize]>+Copy+Default {
        CompoundIndexIter::new(self.sizes.as_ref())
    }
}

/// Iterator over the coordinates of a product space, last dimension fastest.
pub struct CompoundIndexIter<T> {
    shape : T,
    cur   : T,
    done  : bool
}

impl<T> CompoundIndexIter<T> where T : AsMut<[usize]>+Copy+Default {
    fn new(sizes : &[usize]) -> CompoundIndexIter<T> {
        let mut shape = T::default();
        shape.as_mut().copy_from_slice(sizes);
        CompoundIndexIter{
            shape,
            cur : T::default(),
            done : sizes.iter().any(|&d| d == 0)
        }
    }
}

impl<T> Iterator for CompoundIndexIter<T> where T : AsMut<[usize]>+Copy+Default {
    type Item = T;
    fn next(&mut self) -> Option<T> {
        if self.done {
            None
        }
        else {
            let res = self.cur;
            let mut shape = self.shape;
            if 0 < shape.as_mut().iter().zip(self.cur.as_mut().iter_mut()).rev().fold(1, |v,(&d,i)| { *i += v; if *i < d { 0 } else { *i = 0; 1 } }) {
                self.done = true;
            }
            Some(res)
        }
    }
}

//======================================================
// IndexTuple
//======================================================

/// A tuple of typed indices addressing one element of a parameter or variable family.
///
/// Implemented for `()` (scalars), [Index] and tuples of two to six indices.
pub trait IndexTuple : Copy+'static {
    /// Raw coordinates, one per dimension.
    type Raw : AsRef<[usize]>+AsMut<[usize]>+Copy+Default+std::fmt::Debug;

    /// Current size of each dimension.
    fn sizes(reg : &IndexRegistry) -> Result<Self::Raw>;
    fn to_raw(&self) -> Self::Raw;
    fn from_raw(raw : &Self::Raw) -> Self;
    /// Label of each coordinate.
    fn labels(raw : &Self::Raw, reg : &IndexRegistry) -> Result<Vec<String>>;

    /// Size of the product space.
    fn size(reg : &IndexRegistry) -> Result<usize> {
        Ok(CompoundIndex::new(Self::sizes(reg)?).size())
    }

    /// Flat offset of this element, checked against the current dimension sizes.
    fn offset(&self, reg : &IndexRegistry) -> Result<usize> {
        let sizes = Self::sizes(reg)?;
        let raw = self.to_raw();
        CompoundIndex::new(sizes).checked_offset(raw.as_ref())
            .ok_or_else(|| ModelError::InvalidIndex(format!("{:?} is outside the index space {:?}",raw,sizes)))
    }

    /// The element at flat `offset`.
    fn from_offset(offset : usize, reg : &IndexRegistry) -> Result<Self> {
        let ci = CompoundIndex::new(Self::sizes(reg)?);
        if offset >= ci.size() {
            return Err(ModelError::InvalidIndex(format!("offset {} is outside an index space of size {}",offset,ci.size())));
        }
        let mut raw = Self::Raw::default();
        ci.decode_into(offset,raw.as_mut());
        Ok(Self::from_raw(&raw))
    }

    /// Comma separated labels of the element at flat `offset`.
    fn name(offset : usize, reg : &IndexRegistry) -> Result<String> {
        let ci = CompoundIndex::new(Self::sizes(reg)?);
        if offset >= ci.size() {
            return Err(ModelError::InvalidIndex(format!("offset {} is outside an index space of size {}",offset,ci.size())));
        }
        let mut raw = Self::Raw::default();
        ci.decode_into(offset,raw.as_mut());
        Ok(Self::labels(&raw,reg)?.iter().join(","))
    }

    /// All elements in row-major order.
    fn all(reg : &IndexRegistry) -> Result<Vec<Self>> {
        Ok(CompoundIndex::new(Self::sizes(reg)?).iter::<Self::Raw>().map(|raw| Self::from_raw(&raw)).collect())
    }
}

/// A tuple of labels that resolves to the raw coordinates of `I`.
pub trait LabelTuple<I : IndexTuple> {
    fn resolve(&self, reg : &IndexRegistry) -> Result<I::Raw>;
}

impl IndexTuple for () {
    type Raw = [usize;0];
    fn sizes(_reg : &IndexRegistry) -> Result<[usize;0]> { Ok([]) }
    fn to_raw(&self) -> [usize;0] { [] }
    fn from_raw(_raw : &[usize;0]) -> Self {}
    fn labels(_raw : &[usize;0], _reg : &IndexRegistry) -> Result<Vec<String>> { Ok(Vec::new()) }
}

impl LabelTuple<()> for () {
    fn resolve(&self, _reg : &IndexRegistry) -> Result<[usize;0]> { Ok([]) }
}

impl<A : IndexTag> IndexTuple for Index<A> {
    type Raw = [usize;1];
    fn sizes(reg : &IndexRegistry) -> Result<[usize;1]> { Ok([reg.size::<A>()?]) }
    fn to_raw(&self) -> [usize;1] { [self.raw()] }
    fn from_raw(raw : &[usize;1]) -> Self { Index::new(raw[0]) }
    fn labels(raw : &[usize;1], reg : &IndexRegistry) -> Result<Vec<String>> { Ok(vec![reg.label::<A>(raw[0])?]) }
}

impl<A : IndexTag, L : IntoLabel> LabelTuple<Index<A>> for L {
    fn resolve(&self, reg : &IndexRegistry) -> Result<[usize;1]> { Ok([reg.index_of::<A>(&self.to_label())?]) }
}

macro_rules! impl_index_tuple {
    ($n:literal; $($t:ident $l:ident $i:tt),+) => {
        impl<$($t : IndexTag),+> IndexTuple for ($(Index<$t>,)+) {
            type Raw = [usize;$n];
            fn sizes(reg : &IndexRegistry) -> Result<[usize;$n]> { Ok([$(reg.size::<$t>()?),+]) }
            fn to_raw(&self) -> [usize;$n] { [$(self.$i.raw()),+] }
            fn from_raw(raw : &[usize;$n]) -> Self { ($(Index::<$t>::new(raw[$i]),)+) }
            fn labels(raw : &[usize;$n], reg : &IndexRegistry) -> Result<Vec<String>> { Ok(vec![$(reg.label::<$t>(raw[$i])?),+]) }
        }

        impl<$($t : IndexTag, $l : IntoLabel),+> LabelTuple<($(Index<$t>,)+)> for ($($l,)+) {
            fn resolve(&self, reg : &IndexRegistry) -> Result<[usize;$n]> { Ok([$(reg.index_of::<$t>(&self.$i.to_label())?),+]) }
        }
    }
}

impl_index_tuple!(2; A LA 0, B LB 1);
impl_index_tuple!(3; A LA 0, B LB 1, C LC 2);
impl_index_tuple!(4; A LA 0, B LB 1, C LC 2, D LD 3);
impl_index_tuple!(5; A LA 0, B LB 1, C LC 2, D LD 3, E LE 4);
impl_index_tuple!(6; A LA 0, B LB 1, C LC 2, D LD 3, E LE 4, F LF 5);

#[cfg(test)]
mod tests {
    use super::*;

    crate::index_set!(ORIG);
    crate::index_set!(DEST);
    crate::range_set!(DAY = 1 ..= 3);

    #[test]
    fn offsets() {
        let ci = CompoundIndex::new([3usize,7,2]);
        assert_eq!(ci.size(),42);
        assert_eq!(ci.offset(&[0,0,0]),0);
        assert_eq!(ci.offset(&[0,0,1]),1);
        assert_eq!(ci.offset(&[0,1,0]),2);
        assert_eq!(ci.offset(&[2,6,1]),41);
        assert_eq!(ci.checked_offset(&[2,7,1]),None);

        for (k,raw) in ci.iter::<[usize;3]>().enumerate() {
            assert_eq!(ci.offset(&raw),k);
            let mut r = [0usize;3];
            ci.decode_into(k,&mut r);
            assert_eq!(r,raw);
        }
        assert_eq!(ci.iter::<[usize;3]>().count(),42);
        assert_eq!(CompoundIndex::new([3usize,0]).iter::<[usize;2]>().count(),0);
        assert_eq!(CompoundIndex::new([0usize;0]).iter::<[usize;0]>().count(),1);
    }

    #[test]
    fn tuples() {
        let mut reg = IndexRegistry::new();
        for l in ["GARY","CLEV","PITT"] { reg.add_label::<ORIG>(l).unwrap(); }
        for l in ["FRA","DET","LAN","WIN"] { reg.add_label::<DEST>(l).unwrap(); }

        type OD = (Index<ORIG>,Index<DEST>);
        assert_eq!(OD::size(&reg).unwrap(),12);

        let raw = LabelTuple::<OD>::resolve(&("CLEV","LAN"),&reg).unwrap();
        assert_eq!(raw,[1,2]);
        let od = OD::from_raw(&raw);
        let k = od.offset(&reg).unwrap();
        assert_eq!(k,6);
        assert_eq!(OD::name(k,&reg).unwrap(),"CLEV,LAN");
        assert_eq!(OD::from_offset(k,&reg).unwrap(),od);

        // name -> labels -> offset is the identity over the whole space
        for k in 0..12 {
            let name = OD::name(k,&reg).unwrap();
            let parts : Vec<&str> = name.split(',').collect();
            let raw = LabelTuple::<OD>::resolve(&(parts[0],parts[1]),&reg).unwrap();
            assert_eq!(OD::from_raw(&raw).offset(&reg).unwrap(),k);
        }

        assert!(OD::name(12,&reg).is_err());
        assert!((Index::<ORIG>::new(3),Index::<DEST>::new(0)).offset(&reg).is_err());

        type ODD = (Index<ORIG>,Index<DEST>,Index<DAY>);
        assert_eq!(ODD::size(&reg).unwrap(),36);
        assert_eq!(ODD::name(35,&reg).unwrap(),"PITT,WIN,3");
        assert_eq!(ODD::all(&reg).unwrap().len(),36);

        assert_eq!(<()>::size(&reg).unwrap(),1);
        assert_eq!(<()>::name(0,&reg).unwrap(),"");
    }
}
