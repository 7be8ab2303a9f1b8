use itertools::Itertools;

/// Helper trait which can be used to display states, transitions and such.
pub trait Show {
    /// Returns a human readable representation of `self`, for a state name that should be
    /// for example `q0` or `{q0, q1}`, for an edge it should be `a=>q1`.
    /// This is mainly used for diagnostics.
    fn show(&self) -> String;
    /// Show a collection of the thing, for a collection of states this should be `q0, q1, q2`.
    /// By default the elements are joined with a comma.
    fn show_collection<'a, I>(iter: I) -> String
    where
        Self: 'a,
        I: IntoIterator<Item = &'a Self>,
    {
        iter.into_iter().map(|x| x.show()).join(", ")
    }
}

impl Show for String {
    fn show(&self) -> String {
        self.clone()
    }
}

impl Show for str {
    fn show(&self) -> String {
        self.to_string()
    }
}

impl<S: Show + ?Sized> Show for &S {
    fn show(&self) -> String {
        S::show(*self)
    }
}
