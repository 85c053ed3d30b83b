use nativize::prelude::*;

fn main() {
    // Integers accept both integer tags and check the range of the target
    let small = Object::int(200);
    println!("{:?} as u8 = {:?}", small, convert::<u8>(&small));
    println!("{:?} as i8 = {:?}", small, convert::<i8>(&small));

    let big = Object::long(1 << 100);
    println!("{:?} as i128 = {:?}", big, convert::<i128>(&big));
    println!("{:?} as u64 eligible? {}", big, eligible::<u64>(&big));

    // Floats accept integers; infinities overflow
    println!("{:?}", convert::<f64>(&Object::int(3)));
    if let Err(e) = convert::<f32>(&Object::float(1e300)) {
        println!("error: {} ({:?})", e, e.kind());
    }

    // Byte strings and text strings produce the same native string
    let from_bytes: String = convert(&Object::bytes("hello")).expect("utf-8 bytes");
    let from_text: WideString = convert(&Object::text("héllo")).expect("well-formed text");
    println!("{} / {} ({} code points)", from_bytes, from_text, from_text.len());

    // Handles received from the runtime must not be null
    let handle = Object::bool(true);
    println!("{:?}", from_handle::<bool>(Some(&handle)));
}
