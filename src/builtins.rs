/// Directory names removed from packages when importing.
pub const IGNORED_DIRNAMES: &str = ".pc,po,.git,libtool.m4";

// "configure" is kept on purpose: it may be a hand-written shell script.
// Some autotools output is listed because it bloats the index otherwise.
/// File names removed from packages when importing.
pub const IGNORED_FILENAMES: &str = "NEWS,COPYING,LICENSE,CHANGES,Makefile.in,ltmain.sh,config.guess,config.sub,depcomp,aclocal.m4,libtool.m4,.gitignore,57710_init_values.c,57711_init_values.c,57712_init_values.c";

/// Suffixes of files removed from packages when importing.
pub const IGNORED_SUFFIXES: &str =
    "conf,dic,cfg,man,xml,xsl,html,sgml,pod,po,txt,tex,rtf,docbook,symbols";

/// Suffixes of files that are only kept while they stay below the small-file threshold.
pub const ONLY_SMALL_FILES_SUFFIXES: &str = "ref,result,S,out,rst,def,afm,ps,pao,tom,ovp,UPF,map,ucm,json,svg,ppd,acc,ipp,eps,sym,pass,F90,tei,stl,tmp,dmp,vtk,csv,stp,decTest,test,lla,pamphlet";

/// Files above this size are never worth indexing.
pub const MAX_FILE_SIZE: u64 = 1 << 30;

/// Size above which files with a size-gated suffix are excluded.
pub const SMALL_FILE_LIMIT: u64 = 65 * 1024;
