use srglib::mappings::chain;
use srglib::prelude::*;

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn srg(lines: &[&str]) -> FrozenMappings {
    SrgMappingsFormat::parse_lines(lines).unwrap()
}

fn compact(lines: &[&str]) -> FrozenMappings {
    CompactSrgMappingsFormat::parse_lines(lines).unwrap()
}

fn packages(original: &str, renamed: &str) -> PackageMappings {
    PackageMappings::new(vec![(original.to_string(), renamed.to_string())].into_iter().collect()).unwrap()
}

fn server_classes() -> FrozenMappings {
    compact(&["aa Entity", "ab Cow", "ac EntityPlayer", "ad World", "ae Server"])
}

fn server_members() -> FrozenMappings {
    srg(&[
        "CL: af ForgetfulClass",
        "FD: Entity/a Entity/dead",
        "MD: Cow/a (LCow;)V Cow/love (LCow;)V",
        "MD: EntityPlayer/a (Ljava/lang/String;)V EntityPlayer/disconnect (Ljava/lang/String;)V",
        "FD: World/a World/time",
        "MD: World/a ()V World/tick ()V",
        "FD: Server/a Server/ticks",
        "MD: Server/a ()V Server/tick ()V",
    ])
}

#[test]
fn chain_into_package() {
    init_logger();
    let classes = compact(&["aa Entity", "ab Cow"]);
    let fields = srg(&["FD: Entity/a Entity/dead"]);
    let server = packages("", "net.minecraft.server");
    let chained = MappingsChain::new()
        .with(&classes)
        .with(&fields)
        .with(&server)
        .build()
        .unwrap();
    let expected = srg(&[
        "CL: aa net/minecraft/server/Entity",
        "CL: ab net/minecraft/server/Cow",
        "FD: aa/a net/minecraft/server/Entity/dead",
    ]);
    assert_eq!(expected, chained);
}

#[test]
fn chain_three_layers() {
    init_logger();
    let classes = server_classes();
    let members = server_members();
    let server = packages("", "net.minecraft.server");
    let chained = chain(vec![&classes as &dyn Mappings, &members, &server]);
    let expected = srg(&[
        "CL: aa net/minecraft/server/Entity",
        "CL: ab net/minecraft/server/Cow",
        "CL: ac net/minecraft/server/EntityPlayer",
        "CL: ad net/minecraft/server/World",
        "CL: ae net/minecraft/server/Server",
        "CL: af net/minecraft/server/ForgetfulClass",
        "FD: aa/a net/minecraft/server/Entity/dead",
        "MD: ab/a (Lab;)V net/minecraft/server/Cow/love (Lnet/minecraft/server/Cow;)V",
        "MD: ac/a (Ljava/lang/String;)V net/minecraft/server/EntityPlayer/disconnect (Ljava/lang/String;)V",
        "FD: ad/a net/minecraft/server/World/time",
        "MD: ad/a ()V net/minecraft/server/World/tick ()V",
        "FD: ae/a net/minecraft/server/Server/ticks",
        "MD: ae/a ()V net/minecraft/server/Server/tick ()V",
    ]);
    assert_eq!(expected, chained);
}

#[test]
fn chain_renames_of_renames() {
    init_logger();
    let classes = srg(&[
        "CL: aa Entity",
        "CL: ab Cow",
        "CL: ac EntityPlayer",
        "CL: ad World",
        "CL: ae Server",
    ]);
    let members = server_members();
    let second_thoughts = srg(&[
        "CL: ForgetfulClass me/stupid/ChangedMind",
        "FD: World/time World/numTicks",
        "MD: World/tick ()V World/pulse ()V",
    ]);
    let server = packages("", "net.minecraft.server");
    let chained = chain(vec![&classes as &dyn Mappings, &members, &second_thoughts, &server]);
    let expected = srg(&[
        "CL: aa net/minecraft/server/Entity",
        "CL: ab net/minecraft/server/Cow",
        "CL: ac net/minecraft/server/EntityPlayer",
        "CL: ad net/minecraft/server/World",
        "CL: ae net/minecraft/server/Server",
        "CL: af me/stupid/ChangedMind",
        "FD: aa/a net/minecraft/server/Entity/dead",
        "MD: ab/a (Lab;)V net/minecraft/server/Cow/love (Lnet/minecraft/server/Cow;)V",
        "MD: ac/a (Ljava/lang/String;)V net/minecraft/server/EntityPlayer/disconnect (Ljava/lang/String;)V",
        "FD: ad/a net/minecraft/server/World/numTicks",
        "MD: ad/a ()V net/minecraft/server/World/pulse ()V",
        "FD: ae/a net/minecraft/server/Server/ticks",
        "MD: ae/a ()V net/minecraft/server/Server/tick ()V",
    ]);
    assert_eq!(expected, chained);
}

#[test]
fn chaining_is_associative() {
    init_logger();
    let first = srg(&["CL: aa Entity", "CL: ab Cow"]);
    let mut second = SimpleMappings::new();
    second.set_class(JavaType::from_name("Entity").unwrap(), JavaType::from_name("Mob").unwrap()).unwrap();
    second.set_field_name(FieldData::from_internal_name("Entity/a").unwrap(), "dead").unwrap();
    let third = srg(&["CL: Mob Monster", "MD: Cow/a ()V Cow/moo ()V"]);
    let all_at_once = chain(vec![&first as &dyn Mappings, &second, &third]);
    let in_steps = first.chain(&second).chain(&third);
    assert_eq!(all_at_once, in_steps);
    let field = FieldData::from_internal_name("aa/a").unwrap();
    assert_eq!("Monster/dead", all_at_once.get_field(&field).internal_name());
    let method = MethodData::from_internal_name("ab/a", "()V".parse().unwrap()).unwrap();
    assert_eq!("Cow/moo", all_at_once.get_method(&method).internal_name());
}

#[test]
fn inversion_is_an_involution() {
    init_logger();
    let mappings = srg(&[
        "CL: aa Entity",
        "CL: ab Cow",
        "FD: aa/a Entity/dead",
        "MD: ab/a (Lab;)V Cow/love (LCow;)V",
    ]);
    let inverted = mappings.inverted();
    assert_eq!(mappings, inverted.inverted());
    let method = MethodData::from_internal_name("Cow/love", "(LCow;)V".parse().unwrap()).unwrap();
    assert_eq!("ab/a", inverted.get_method(&method).internal_name());
    assert_eq!("(Lab;)V", inverted.get_method(&method).signature().descriptor());
    // Chaining with the inverse undoes every rename
    let undone = mappings.chain(&inverted);
    for (original, _) in mappings.classes() {
        assert_eq!(*original, undone.get_class(original));
    }
    for (original, _) in mappings.fields() {
        assert_eq!(*original, undone.get_field(original));
    }
}

#[test]
fn only_first_original() {
    init_logger();
    let classes = server_classes();
    let members = server_members();
    let error = MappingsChain::new()
        .with(&classes)
        .with(&members)
        .only_first_original(true)
        .build()
        .unwrap_err();
    assert_eq!(SrgError::AmbiguousChain { layer: 1, name: "af".into() }, error);
    // Without the new class every later entry renames something already known
    let mut known_members = members.rebuild();
    known_members.retain_classes(|original, _| original.name() != "af");
    let chained = MappingsChain::new()
        .with(&classes)
        .with(&known_members)
        .only_first_original(true)
        .build()
        .unwrap();
    assert_eq!(5, chained.class_count());
    assert_eq!(3, chained.field_count());
}

#[test]
fn transform_packages_after_chaining() {
    init_logger();
    let chained = server_classes().chain(&server_members());
    let moved = chained
        .transform_packages(|package| if package.is_empty() { Some("net/minecraft/server".into()) } else { None });
    let field = FieldData::from_internal_name("aa/a").unwrap();
    assert_eq!("net/minecraft/server/Entity/dead", moved.get_field(&field).internal_name());
    let method = MethodData::from_internal_name("ac/a", "(Ljava/lang/String;)V".parse().unwrap()).unwrap();
    let renamed = moved.get_method(&method);
    assert_eq!("net/minecraft/server/EntityPlayer/disconnect", renamed.internal_name());
    assert_eq!("(Ljava/lang/String;)V", renamed.signature().descriptor());
}
