use cesium_skiplist::{
    SkipList,
    SkipListError,
};

fn main() -> Result<(), SkipListError> {
    let mut list = SkipList::<f32>::new(8)?;

    list.insert(3, 12.7);
    list.insert(6, 44.4);
    list.insert(9, 723.9);

    list.insert(1, 2.2);
    list.insert(4, 999.99);
    list.delete(3);
    list.insert(3, 32.5);

    list.insert(20, 0.78);

    let values: Vec<f32> = list.values().copied().collect();
    println!("{:?}", values);

    Ok(())
}
