/// Removes repeated values, keeping the first occurrence of each in input order.
pub fn dedup_preserving_order<I, T>(values: I) -> Vec<T>
where
    I: IntoIterator<Item = T>,
    T: PartialEq,
{
    let mut unique: Vec<T> = Vec::new();
    for value in values {
        if !unique.contains(&value) {
            unique.push(value);
        }
    }
    unique
}
