use super::*;

const HEADER: &str = "url,name,price,cover_image,all_images,subcategory,category\n";

fn product(name: &str, price: &str) -> FlatProduct {
    FlatProduct {
        name: name.to_owned(),
        price: price.to_owned(),
        subcategory: "occ".to_owned(),
        ..FlatProduct::default()
    }
}

fn write_batch(dir: &Path, file: &str, products: &[FlatProduct]) {
    std::fs::write(dir.join(file), serde_json::to_vec(products).unwrap()).unwrap();
}

// -----------------------------------------------------------------------
// aggregate_batches
// -----------------------------------------------------------------------

#[tokio::test]
async fn missing_directory_is_an_error() {
    let root = tempfile::tempdir().unwrap();
    let result = aggregate_batches(&root.path().join("batches")).await;
    assert!(
        matches!(result, Err(ScraperError::BatchDirMissing { .. })),
        "expected BatchDirMissing, got: {result:?}"
    );
}

#[tokio::test]
async fn file_in_place_of_directory_is_an_error() {
    let root = tempfile::tempdir().unwrap();
    let path = root.path().join("batches");
    std::fs::write(&path, "[]").unwrap();
    assert!(matches!(
        aggregate_batches(&path).await,
        Err(ScraperError::BatchDirMissing { .. })
    ));
}

#[tokio::test]
async fn empty_directory_yields_no_products() {
    let root = tempfile::tempdir().unwrap();
    let products = aggregate_batches(root.path()).await.unwrap();
    assert!(products.is_empty());
}

#[tokio::test]
async fn merges_products_from_all_batches() {
    let root = tempfile::tempdir().unwrap();
    write_batch(root.path(), "1.json", &[product("a", "1"), product("b", "2")]);
    write_batch(root.path(), "2.json", &[product("c", "3")]);

    let mut names: Vec<String> = aggregate_batches(root.path())
        .await
        .unwrap()
        .into_iter()
        .map(|p| p.name)
        .collect();
    names.sort();
    assert_eq!(names, ["a", "b", "c"]);
}

#[tokio::test]
async fn duplicate_names_within_a_batch_keep_the_first() {
    let root = tempfile::tempdir().unwrap();
    write_batch(
        root.path(),
        "1.json",
        &[product("a", "1"), product("a", "2"), product("b", "3")],
    );

    let products = aggregate_batches(root.path()).await.unwrap();
    assert_eq!(products, vec![product("a", "1"), product("b", "3")]);
}

#[tokio::test]
async fn duplicate_names_across_batches_survive_once() {
    let root = tempfile::tempdir().unwrap();
    write_batch(root.path(), "1.json", &[product("shared", "100")]);
    write_batch(root.path(), "2.json", &[product("shared", "200")]);

    let first_listed = std::fs::read_dir(root.path())
        .unwrap()
        .map(|entry| entry.unwrap().file_name())
        .next()
        .unwrap();
    let expected_price = if first_listed == "1.json" { "100" } else { "200" };

    let products = aggregate_batches(root.path()).await.unwrap();
    assert_eq!(products, vec![product("shared", expected_price)]);
}

#[tokio::test]
async fn unparsable_batches_are_skipped() {
    let root = tempfile::tempdir().unwrap();
    write_batch(root.path(), "1.json", &[product("a", "1")]);
    std::fs::write(root.path().join("2.json"), "{truncated").unwrap();

    let products = aggregate_batches(root.path()).await.unwrap();
    assert_eq!(products, vec![product("a", "1")]);
}

#[tokio::test]
async fn subdirectories_are_skipped() {
    let root = tempfile::tempdir().unwrap();
    std::fs::create_dir(root.path().join("nested")).unwrap();
    write_batch(root.path(), "1.json", &[product("a", "1")]);

    let products = aggregate_batches(root.path()).await.unwrap();
    assert_eq!(products.len(), 1);
}

// -----------------------------------------------------------------------
// to_csv
// -----------------------------------------------------------------------

#[test]
fn empty_product_list_renders_header_only() {
    assert_eq!(to_csv(&[]).unwrap(), HEADER);
}

#[test]
fn rows_follow_header_column_order() {
    let row = FlatProduct {
        url: String::new(),
        name: "Cat Card".to_owned(),
        price: "999".to_owned(),
        cover_image: "front.jpg".to_owned(),
        all_images: "inside.jpg|back.jpg".to_owned(),
        subcategory: "occ".to_owned(),
        category: "Birthday Cards".to_owned(),
    };
    let csv = to_csv(&[row]).unwrap();
    assert_eq!(
        csv,
        format!("{HEADER},Cat Card,999,front.jpg,inside.jpg|back.jpg,occ,Birthday Cards\n")
    );
}

#[test]
fn fields_with_commas_and_quotes_are_escaped() {
    let row = product("Love, \"Always\"", "250");
    let csv = to_csv(&[row]).unwrap();
    assert!(
        csv.contains(r#","Love, ""Always""",250,"#),
        "got: {csv}"
    );
}
