/// In-place inclusive prefix sums.
pub trait Cummulate {
    fn cummulate(& mut self);
}

impl<T> Cummulate for [T] where
    T : Copy+std::ops::AddAssign
{
    fn cummulate(& mut self) {
        if let Some((&mut v0,rest)) = self.split_first_mut() {
            rest.iter_mut().fold(v0,|c,v| { *v += c; *v });
        }
    }
}

/// A trait that supplies functionality for appending self to a name as a bracketed label list.
pub trait NameAppender {
    /// Append `[l0,l1,...]` to `s`. Nothing is appended for an empty list.
    fn append_to_string(&self, s : & mut String);
}

impl<T> NameAppender for [T] where T : AsRef<str> {
    fn append_to_string(&self, s : & mut String) {
        if let Some((first,rest)) = self.split_first() {
            s.push('[');
            s.push_str(first.as_ref());
            for l in rest { s.push(','); s.push_str(l.as_ref()) }
            s.push(']');
        }
    }
}

/// `base[l0,l1,...]`, or just `base` for no labels.
pub fn indexed_name<T : AsRef<str>>(base : &str, labels : &[T]) -> String {
    let mut s = base.to_string();
    labels.append_to_string(&mut s);
    s
}
