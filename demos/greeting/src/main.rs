use rebind_core::{Object, Options};
use rebind_dom::{Document, Mvvm, Node};

fn page() -> Document {
    let app = Node::element("div")
        .with_attr("id", "app")
        .with_child(Node::element("h1").with_child(Node::text("{{ message }}, {{ user.name }}!")))
        .with_child(Node::element("p").with_attr("v-text", "user.city"))
        .with_child(
            Node::element("input")
                .with_attr("type", "text")
                .with_attr("v-model", "user.name"),
        );
    Document::new(Node::element("body").with_child(app))
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let doc = page();
    let data = serde_json::json!({
        "message": "Hello",
        "user": { "name": "Alice", "city": "Lisbon" }
    });
    let mvvm = Mvvm::new(&doc, "#app", Options::new(data))?;
    println!("{}", mvvm.el().render());

    mvvm.vm().set("message", "Welcome back")?;
    println!("{}", mvvm.el().render());

    if let Some(input) = doc.query("input") {
        input.dispatch_input("Bob");
    }
    println!("{}", mvvm.el().render());

    let user = Object::new().with("name", "Carol").with("city", "Porto");
    mvvm.vm().set("user", user)?;
    println!("{}", mvvm.el().render());

    log::info!("unmounting");
    let el = mvvm.unmount();
    println!("{}", el.render());
    Ok(())
}
