#[cfg(test)]
mod tests {
    use rebind_core::{Object, Options, ReactiveError, Tracking, Value};
    use serde_json::json;

    use crate::*;

    fn page() -> (Document, Node) {
        let app = Node::element("div")
            .with_attr("id", "app")
            .with_child(Node::element("h1").with_child(Node::text("{{ message }}")))
            .with_child(Node::element("p").with_attr("v-text", "user.name"))
            .with_child(
                Node::element("input")
                    .with_attr("type", "text")
                    .with_attr("v-model", "user.name"),
            );
        let doc = Document::new(Node::element("body").with_child(app.clone()));
        (doc, app)
    }

    fn data() -> serde_json::Value {
        json!({ "message": "hi", "user": { "name": "Alice" } })
    }

    #[test]
    fn test_mount_renders_initial_values() {
        let (doc, app) = page();
        let mvvm = Mvvm::new(&doc, "#app", Options::new(data())).unwrap();
        assert!(mvvm.el().ptr_eq(&app));
        insta::assert_snapshot!(
            app.render(),
            @r#"<div id="app"><h1>hi</h1><p v-text="user.name">Alice</p><input type="text" v-model="user.name" value="Alice"></div>"#
        );
        assert_eq!(mvvm.vm().scope().len(), 3);
    }

    #[test]
    fn test_writes_propagate_to_view() {
        let (doc, app) = page();
        let mvvm = Mvvm::new(&doc, &app, Options::new(data())).unwrap();

        mvvm.vm().set("message", "hello").unwrap();
        mvvm.vm().set("user.name", "Bob").unwrap();
        insta::assert_snapshot!(
            app.render(),
            @r#"<div id="app"><h1>hello</h1><p v-text="user.name">Bob</p><input type="text" v-model="user.name" value="Bob"></div>"#
        );
    }

    #[test]
    fn test_model_input_writes_back() {
        let (doc, app) = page();
        let mvvm = Mvvm::new(&doc, "#app", Options::new(data())).unwrap();

        let input = doc.query("input").unwrap();
        input.dispatch_input("Carol");
        assert_eq!(mvvm.vm().get("user.name").unwrap(), Value::from("Carol"));
        assert_eq!(app.children()[1].text_content(), "Carol");
    }

    #[test]
    fn test_interpolation_rerenders_whole_template() {
        let app = Node::element("div").with_child(Node::text("{{a}}-{{b.c}}-{{a}}"));
        let doc = Document::new(app.clone());
        let mvvm = Mvvm::new(&doc, "div", Options::new(json!({ "a": 1, "b": { "c": "x" } }))).unwrap();
        assert_eq!(app.text_content(), "1-x-1");

        mvvm.vm().set("a", 2).unwrap();
        assert_eq!(app.text_content(), "2-x-2");

        // replacing the parent object re-renders through the new value
        mvvm.vm()
            .set("b", Object::new().with("c", "y"))
            .unwrap();
        assert_eq!(app.text_content(), "2-y-2");
    }

    #[test]
    fn test_every_update_tracking_follows_replaced_objects() {
        let app = Node::element("div").with_child(Node::text("{{user.name}}"));
        let doc = Document::new(app.clone());
        let mvvm = Mvvm::new(
            &doc,
            "div",
            Options::new(data()).tracking(Tracking::EveryUpdate),
        )
        .unwrap();

        let carol = Object::new().with("name", "Carol");
        mvvm.vm().set("user", carol.clone()).unwrap();
        carol.set("name", "Dave");
        assert_eq!(app.text_content(), "Dave");
    }

    #[test]
    fn test_invalid_mount_targets() {
        let (doc, _) = page();
        let err = Mvvm::new(&doc, "#nope", Options::new(data())).err();
        assert_eq!(
            err,
            Some(DomError::InvalidMount {
                target: "#nope".into()
            })
        );

        let stray = Node::text("{{ message }}");
        let data = Value::from(data());
        assert!(matches!(
            Mvvm::new(&doc, stray, Options::new(data.clone())),
            Err(DomError::InvalidMount { .. })
        ));
        // nothing was observed
        assert!(!data.as_object().unwrap().is_observed());
    }

    #[test]
    fn test_compile_error_keeps_tree_attached() {
        let app = Node::element("div")
            .with_child(Node::element("span").with_child(Node::text("ok")))
            .with_child(Node::element("p").with_attr("v-text", "user.age"));
        let doc = Document::new(app.clone());

        let err = Mvvm::new(&doc, "div", Options::new(data())).err();
        assert!(matches!(
            err,
            Some(DomError::Reactive(ReactiveError::MissingPath { .. }))
        ));
        assert_eq!(app.children().len(), 2);
        assert_eq!(app.text_content(), "ok");
    }

    #[test]
    fn test_unknown_directives_are_skipped() {
        let app = Node::element("div")
            .with_child(Node::element("div").with_attr("v-html", "message"))
            .with_child(Node::element("b").with_attr("class", "x").with_attr("v-text", "message"));
        let doc = Document::new(app.clone());
        let mvvm = Mvvm::new(&doc, "div", Options::new(data())).unwrap();
        assert_eq!(mvvm.vm().scope().len(), 1);
        assert_eq!(app.text_content(), "hi");
    }

    #[test]
    fn test_unmount_stops_updates() {
        let (doc, app) = page();
        let mvvm = Mvvm::new(&doc, "#app", Options::new(data())).unwrap();
        let data = mvvm.data().clone();

        let el = mvvm.unmount();
        assert!(el.ptr_eq(&app));
        rebind_core::write_value(&data, "message", "ignored").unwrap();
        assert_eq!(app.children()[0].text_content(), "hi");
    }
}
