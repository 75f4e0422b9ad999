/// Builds an anonymous value node from literal syntax.
///
/// Arrays become lists, objects become inline tables, and any other
/// expression goes through `Node::from`. Integer literals are `i32` unless
/// suffixed; float literals keep the digit count [`Float`](crate::Float)
/// infers from their value.
///
/// # Panics
///
/// Panics if array elements do not share one kind, or if an object repeats
/// a key or uses an empty one. Build with [`Node::list`](crate::Node::list)
/// and [`Node::insert`](crate::Node::insert) to handle those as errors.
///
/// # Examples
///
/// ```rust
/// use toml_tree::{get, toml_node, Node};
///
/// let point = toml_node!({ "x": 1, "y": 2, "tags": ["a", "b"] });
/// assert_eq!(get(&point, "y").and_then(Node::as_int), Some(2));
/// assert_eq!(get(&point, "tags").and_then(Node::as_array).map(<[Node]>::len), Some(2));
/// ```
#[macro_export]
macro_rules! toml_node {
    (true) => {
        $crate::Node::from(true)
    };

    (false) => {
        $crate::Node::from(false)
    };

    ([]) => {
        $crate::Node::empty_list()
    };

    ([ $($elem:tt),* $(,)? ]) => {
        $crate::Node::list(vec![$($crate::toml_node!($elem)),*])
            .expect("toml_node!: list elements must share one kind")
    };

    ({}) => {
        $crate::Node::inline_table()
    };

    ({ $($key:literal : $value:tt),* $(,)? }) => {{
        let mut table = $crate::Node::inline_table();
        $(
            table
                .insert($key, $crate::toml_node!($value))
                .expect("toml_node!: keys must be unique and non-empty");
        )*
        table
    }};

    ($e:expr) => {
        $crate::Node::from($e)
    };
}
