use nativize::prelude::*;

#[derive(Default, Debug)]
struct Point {
    x: f64,
    y: f64,
}

fn point_builder() -> NamedBuilder<Point> {
    NamedBuilder::new()
        .member("x", |p: &mut Point| &mut p.x)
        .member("y", |p: &mut Point| &mut p.y)
}

impl FromForeign for Point {
    fn from_foreign(value: &Object) -> ConvertResult<Self> {
        point_builder().convert(value)
    }

    fn eligible(value: &Object) -> bool {
        point_builder().eligible(value)
    }
}

#[derive(Default, Debug)]
struct Path {
    name: String,
    points: Vec<Point>,
}

impl Path {
    fn set_name(&mut self, name: String) {
        self.name = name;
    }
}

fn main() {
    // Points come from dicts or from attribute objects; missing names keep defaults
    let points = Object::list([
        Object::str_dict([("x", Object::int(0)), ("y", Object::int(0))]),
        Object::instance("Point", [("x", Object::float(2.5))]),
        Object::str_dict([("y", Object::int(4))]),
    ]);
    let parsed: Vec<Point> = convert(&points).expect("points");
    println!("{:?}", parsed);

    // A path is a (name, points) tuple
    let path = PositionalBuilder::<Path>::new()
        .setter(Path::set_name)
        .field(SeqOf::new(point_builder()), Assign::member(|p: &mut Path| &mut p.points));

    let value = Object::tuple([Object::text("walk"), points]);
    println!("{:?}", path.convert(&value));

    let broken = Object::tuple([
        Object::text("walk"),
        Object::list([Object::str_dict([("x", Object::text("east"))])]),
    ]);
    println!("eligible: {}", path.eligible(&broken));
    if let Err(e) = path.convert(&broken) {
        println!("error: {}", e);
        println!("path: {:?}", e.path());
    }
}
